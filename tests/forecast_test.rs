//! Forecasting behavior tests

#[cfg(test)]
mod tests {
    use kpicore::{
        fit_and_forecast, Error, KpiForecaster, ModelConfig, ModelConfigBuilder, ModelKind,
        Period, Series,
    };

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn quarterly_series(values: &[f64]) -> Series {
        let start = Period::new(2022, 1).unwrap();
        Series::from_values("test_kpi", "region-01", start, values)
    }

    #[test]
    fn test_returns_exactly_horizon_points_with_ordered_bounds() {
        init_logging();
        let series = quarterly_series(&[10.0, 12.0, 11.5, 14.0, 15.5, 15.0, 17.0, 18.5]);
        for kind in [ModelKind::GradientBoosting, ModelKind::Linear] {
            let config = ModelConfigBuilder::new()
                .horizon(6)
                .model_kind(kind)
                .build()
                .unwrap();
            let points = fit_and_forecast(&series, &config).unwrap();
            assert_eq!(points.len(), 6);
            for p in &points {
                assert!(
                    p.lower_bound <= p.predicted_value && p.predicted_value <= p.upper_bound,
                    "bounds out of order for {:?}: {:?}",
                    kind,
                    p
                );
                assert!(p.predicted_value.is_finite());
            }
        }
    }

    #[test]
    fn test_forecast_periods_continue_after_last_observation() {
        // 5 quarters from 2022-Q1 end at 2023-Q1
        let series = quarterly_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let config = ModelConfigBuilder::new().horizon(4).build().unwrap();
        let points = fit_and_forecast(&series, &config).unwrap();

        let mut expected = series.last_period().unwrap();
        for p in &points {
            expected = expected.next();
            assert_eq!(p.period, expected);
        }
        assert_eq!(points[0].period, Period::new(2023, 2).unwrap());
        assert_eq!(points[3].period, Period::new(2024, 1).unwrap());
    }

    #[test]
    fn test_three_points_insufficient_four_points_succeed() {
        let config = ModelConfig::default();

        let short = quarterly_series(&[1.0, 2.0, 3.0]);
        match fit_and_forecast(&short, &config) {
            Err(Error::InsufficientData { required, actual }) => {
                assert_eq!(required, 4);
                assert_eq!(actual, 3);
            }
            other => panic!("expected InsufficientData, got {:?}", other),
        }

        let enough = quarterly_series(&[1.0, 2.0, 3.0, 4.0]);
        assert!(fit_and_forecast(&enough, &config).is_ok());
    }

    #[test]
    fn test_constant_series_is_degenerate() {
        let series = quarterly_series(&[50.0; 10]);
        match fit_and_forecast(&series, &ModelConfig::default()) {
            Err(Error::DegenerateSeries(_)) => {}
            other => panic!("expected DegenerateSeries, got {:?}", other),
        }
    }

    #[test]
    fn test_nan_inf_entries_are_dropped_before_validation() {
        let config = ModelConfig::default();

        // 3 valid + 2 invalid entries: cleaning first, then the count check
        let mixed_short = quarterly_series(&[1.0, f64::NAN, 2.0, f64::INFINITY, 3.0]);
        assert!(matches!(
            fit_and_forecast(&mixed_short, &config),
            Err(Error::InsufficientData { actual: 3, .. })
        ));

        // Interspersed invalid entries with >= 4 valid ones: results match
        // running on the pre-cleaned series directly
        let dirty = quarterly_series(&[
            10.0,
            f64::NAN,
            12.0,
            11.0,
            f64::NEG_INFINITY,
            14.0,
            13.5,
        ]);
        let clean = dirty.cleaned();
        let from_dirty = fit_and_forecast(&dirty, &config).unwrap();
        let from_clean = fit_and_forecast(&clean, &config).unwrap();
        assert_eq!(from_dirty.len(), from_clean.len());
        for (a, b) in from_dirty.iter().zip(&from_clean) {
            assert_eq!(a.predicted_value, b.predicted_value);
            assert_eq!(a.lower_bound, b.lower_bound);
            assert_eq!(a.upper_bound, b.upper_bound);
        }
    }

    #[test]
    fn test_same_seed_is_deterministic() {
        let series = quarterly_series(&[3.0, 7.0, 5.0, 9.0, 8.0, 12.0, 11.0, 15.0]);
        let config = ModelConfigBuilder::new().random_seed(1234).build().unwrap();

        let a = fit_and_forecast(&series, &config).unwrap();
        let b = fit_and_forecast(&series, &config).unwrap();
        for (pa, pb) in a.iter().zip(&b) {
            assert_eq!(pa.predicted_value, pb.predicted_value);
            assert_eq!(pa.lower_bound, pb.lower_bound);
            assert_eq!(pa.upper_bound, pb.upper_bound);
            assert_eq!(pa.period, pb.period);
        }
    }

    #[test]
    fn test_invalid_config_fails_before_data_is_touched() {
        let series = quarterly_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let bad_confidence = ModelConfig {
            confidence_level: 1.5,
            ..ModelConfig::default()
        };
        assert!(matches!(
            fit_and_forecast(&series, &bad_confidence),
            Err(Error::InvalidConfig(_))
        ));

        let bad_horizon = ModelConfig {
            horizon: 0,
            ..ModelConfig::default()
        };
        assert!(matches!(
            fit_and_forecast(&series, &bad_horizon),
            Err(Error::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_forecast_before_fit_is_not_fitted() {
        let forecaster = KpiForecaster::new(ModelConfig::default()).unwrap();
        assert!(matches!(forecaster.forecast(), Err(Error::NotFitted)));
        assert!(matches!(
            forecaster.training_metrics(),
            Err(Error::NotFitted)
        ));
    }

    #[test]
    fn test_linear_model_extends_exact_trend() {
        // y = 3 + 2x over 8 quarters; OLS fits it exactly, so forecasts
        // continue the line and the residual band collapses to zero width
        let values: Vec<f64> = (0..8).map(|i| 3.0 + 2.0 * i as f64).collect();
        let series = quarterly_series(&values);
        let config = ModelConfigBuilder::new()
            .model_kind(ModelKind::Linear)
            .horizon(3)
            .build()
            .unwrap();

        let points = fit_and_forecast(&series, &config).unwrap();
        for (h, p) in points.iter().enumerate() {
            let expected = 3.0 + 2.0 * (8 + h) as f64;
            assert!(
                (p.predicted_value - expected).abs() < 1e-9,
                "horizon {}: predicted {}, expected {}",
                h,
                p.predicted_value,
                expected
            );
            assert!((p.upper_bound - p.lower_bound).abs() < 1e-9);
        }
    }

    #[test]
    fn test_band_width_constant_across_horizon() {
        let series = quarterly_series(&[3.0, 7.0, 5.0, 9.0, 8.0, 12.0, 11.0, 15.0]);
        for kind in [ModelKind::GradientBoosting, ModelKind::Linear] {
            let config = ModelConfigBuilder::new()
                .model_kind(kind)
                .horizon(8)
                .build()
                .unwrap();
            let points = fit_and_forecast(&series, &config).unwrap();
            let width = points[0].upper_bound - points[0].lower_bound;
            for p in &points {
                assert!((p.upper_bound - p.lower_bound - width).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn test_higher_confidence_widens_band() {
        let series = quarterly_series(&[3.0, 7.0, 5.0, 9.0, 8.0, 12.0, 11.0, 15.0]);
        let narrow = fit_and_forecast(
            &series,
            &ModelConfigBuilder::new().confidence_level(0.80).build().unwrap(),
        )
        .unwrap();
        let wide = fit_and_forecast(
            &series,
            &ModelConfigBuilder::new().confidence_level(0.99).build().unwrap(),
        )
        .unwrap();
        let narrow_width = narrow[0].upper_bound - narrow[0].lower_bound;
        let wide_width = wide[0].upper_bound - wide[0].lower_bound;
        assert!(wide_width > narrow_width);
    }

    #[test]
    fn test_training_metrics_available_after_fit() {
        let series = quarterly_series(&[3.0, 7.0, 5.0, 9.0, 8.0, 12.0, 11.0, 15.0]);
        let mut forecaster = KpiForecaster::new(ModelConfig::default()).unwrap();
        forecaster.fit(&series).unwrap();
        let metrics = forecaster.training_metrics().unwrap();
        assert!(metrics.mae >= 0.0);
        assert!(metrics.rmse >= metrics.mae - 1e-12);
        assert!(metrics.residual_std >= 0.0);
    }

    #[test]
    fn test_forecast_point_serializes() {
        let series = quarterly_series(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        let points = fit_and_forecast(&series, &ModelConfig::default()).unwrap();
        let json = serde_json::to_string(&points).unwrap();
        let back: Vec<kpicore::ForecastPoint> = serde_json::from_str(&json).unwrap();
        assert_eq!(points, back);
    }
}
