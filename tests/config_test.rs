//! ModelConfig validation and builder tests

#[cfg(test)]
mod tests {
    use kpicore::{ModelConfig, ModelConfigBuilder, ModelKind, MAX_FORECAST_HORIZON};

    #[test]
    fn test_default_config_is_valid() {
        let config = ModelConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.horizon, 4);
        assert_eq!(config.confidence_level, 0.95);
        assert_eq!(config.model_kind, ModelKind::GradientBoosting);
        assert_eq!(config.random_seed, 42);
        assert_eq!(config.z_threshold_warning, 2.0);
        assert_eq!(config.z_threshold_critical, 3.0);
    }

    #[test]
    fn test_builder_matches_struct_literal() {
        let built = ModelConfigBuilder::new()
            .horizon(8)
            .confidence_level(0.9)
            .model_kind(ModelKind::Linear)
            .random_seed(7)
            .z_threshold_warning(2.5)
            .z_threshold_critical(3.5)
            .build()
            .unwrap();
        let literal = ModelConfig {
            horizon: 8,
            confidence_level: 0.9,
            model_kind: ModelKind::Linear,
            random_seed: 7,
            z_threshold_warning: 2.5,
            z_threshold_critical: 3.5,
        };
        assert_eq!(built, literal);
    }

    #[test]
    fn test_builder_rejects_invalid_values() {
        assert!(ModelConfigBuilder::new().horizon(0).build().is_err());
        assert!(ModelConfigBuilder::new()
            .horizon(MAX_FORECAST_HORIZON + 1)
            .build()
            .is_err());
        assert!(ModelConfigBuilder::new().confidence_level(0.0).build().is_err());
        assert!(ModelConfigBuilder::new().confidence_level(1.0).build().is_err());
        assert!(ModelConfigBuilder::new().confidence_level(1.5).build().is_err());
        assert!(ModelConfigBuilder::new()
            .z_threshold_warning(-1.0)
            .build()
            .is_err());
        assert!(ModelConfigBuilder::new()
            .z_threshold_warning(3.5)
            .z_threshold_critical(2.0)
            .build()
            .is_err());
    }

    #[test]
    fn test_horizon_cap_is_inclusive() {
        assert!(ModelConfigBuilder::new()
            .horizon(MAX_FORECAST_HORIZON)
            .build()
            .is_ok());
        assert!(ModelConfigBuilder::new().horizon(1).build().is_ok());
    }

    #[test]
    fn test_equal_thresholds_are_allowed() {
        let config = ModelConfigBuilder::new()
            .z_threshold_warning(2.5)
            .z_threshold_critical(2.5)
            .build()
            .unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_serde_round_trip() {
        let config = ModelConfigBuilder::new()
            .model_kind(ModelKind::Linear)
            .horizon(12)
            .build()
            .unwrap();
        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("\"linear\""));
        let back: ModelConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }
}
