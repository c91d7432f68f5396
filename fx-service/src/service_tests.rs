//! ExchangeService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::collections::BTreeMap;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use chrono::NaiveDate;

    use fx_types::{CurrencyCode, ExchangeRate, RateProvider, ServiceError, TimeSeries};

    use crate::ExchangeService;

    /// A request the mock received.
    #[derive(Debug, Clone, PartialEq)]
    pub enum Call {
        Latest {
            base: Option<CurrencyCode>,
            symbols: Vec<CurrencyCode>,
        },
        Historical(NaiveDate),
        TimeSeries {
            start: NaiveDate,
            end: Option<NaiveDate>,
            base: Option<CurrencyCode>,
            symbols: Vec<CurrencyCode>,
        },
        Currencies,
    }

    /// In-memory rate provider that records every call.
    pub struct MockProvider {
        latest: BTreeMap<CurrencyCode, f64>,
        series: BTreeMap<NaiveDate, BTreeMap<CurrencyCode, f64>>,
        catalog: BTreeMap<CurrencyCode, String>,
        fail: bool,
        calls: Mutex<Vec<Call>>,
    }

    impl MockProvider {
        pub fn new() -> Self {
            Self {
                latest: BTreeMap::new(),
                series: BTreeMap::new(),
                catalog: BTreeMap::new(),
                fail: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        pub fn with_latest(mut self, symbol: &str, rate: f64) -> Self {
            self.latest.insert(code(symbol), rate);
            self
        }

        pub fn with_point(mut self, date: NaiveDate, symbol: &str, rate: f64) -> Self {
            self.series.entry(date).or_default().insert(code(symbol), rate);
            self
        }

        pub fn with_currency(mut self, symbol: &str, name: &str) -> Self {
            self.catalog.insert(code(symbol), name.to_string());
            self
        }

        pub fn failing() -> Self {
            Self {
                fail: true,
                ..Self::new()
            }
        }

        pub fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: Call) -> Result<(), ServiceError> {
            self.calls.lock().unwrap().push(call);
            if self.fail {
                Err(ServiceError::Transport("connection refused".into()))
            } else {
                Ok(())
            }
        }

        /// Mimics the service: only the requested symbols come back.
        fn restrict(
            rates: &BTreeMap<CurrencyCode, f64>,
            symbols: &[CurrencyCode],
        ) -> BTreeMap<CurrencyCode, f64> {
            rates
                .iter()
                .filter(|(k, _)| symbols.is_empty() || symbols.contains(k))
                .map(|(k, v)| (k.clone(), *v))
                .collect()
        }
    }

    #[async_trait]
    impl RateProvider for MockProvider {
        async fn get_latest_rates(
            &self,
            base: Option<&CurrencyCode>,
            symbols: &[CurrencyCode],
        ) -> Result<ExchangeRate, ServiceError> {
            self.record(Call::Latest {
                base: base.cloned(),
                symbols: symbols.to_vec(),
            })?;
            Ok(ExchangeRate {
                base: base.cloned().unwrap_or_else(|| code("EUR")),
                date: day(10),
                rates: Self::restrict(&self.latest, symbols),
            })
        }

        async fn get_historical_rates(
            &self,
            date: NaiveDate,
            base: Option<&CurrencyCode>,
            symbols: &[CurrencyCode],
        ) -> Result<ExchangeRate, ServiceError> {
            self.record(Call::Historical(date))?;
            Ok(ExchangeRate {
                base: base.cloned().unwrap_or_else(|| code("EUR")),
                date,
                rates: Self::restrict(&self.latest, symbols),
            })
        }

        async fn get_time_series(
            &self,
            start_date: NaiveDate,
            end_date: Option<NaiveDate>,
            base: Option<&CurrencyCode>,
            symbols: &[CurrencyCode],
        ) -> Result<TimeSeries, ServiceError> {
            self.record(Call::TimeSeries {
                start: start_date,
                end: end_date,
                base: base.cloned(),
                symbols: symbols.to_vec(),
            })?;
            let rates = self
                .series
                .iter()
                .map(|(date, day)| (*date, Self::restrict(day, symbols)))
                .filter(|(_, day)| !day.is_empty())
                .collect();
            // Rates only, like services that do not echo the window.
            Ok(TimeSeries {
                base: base.cloned().unwrap_or_else(|| code("EUR")),
                start_date: None,
                end_date: None,
                rates,
            })
        }

        async fn get_currencies(&self) -> Result<BTreeMap<CurrencyCode, String>, ServiceError> {
            self.record(Call::Currencies)?;
            Ok(self.catalog.clone())
        }
    }

    fn code(s: &str) -> CurrencyCode {
        s.parse().unwrap()
    }

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
    }

    const EXPIRY: Duration = Duration::from_secs(300);

    // ─────────────────────────────────────────────────────────────────────────────
    // Currency Catalog
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test(start_paused = true)]
    async fn test_currencies_cached_within_expiry() {
        let provider = MockProvider::new()
            .with_currency("EUR", "Euro")
            .with_currency("USD", "United States Dollar");
        let mut service = ExchangeService::new(provider, EXPIRY);

        let first = service.get_currencies().await.unwrap().clone();
        tokio::time::advance(Duration::from_secs(299)).await;
        let second = service.get_currencies().await.unwrap().clone();

        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert_eq!(first[&code("EUR")].name(), "Euro");
        assert_eq!(service.provider().calls(), vec![Call::Currencies]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_currencies_refetched_after_expiry() {
        let provider = MockProvider::new().with_currency("EUR", "Euro");
        let mut service = ExchangeService::new(provider, EXPIRY);

        service.get_currencies().await.unwrap();
        tokio::time::advance(Duration::from_secs(301)).await;
        service.get_currencies().await.unwrap();
        assert_eq!(service.provider().calls().len(), 2);

        // Fresh again right after the refresh.
        service.get_currencies().await.unwrap();
        assert_eq!(service.provider().calls().len(), 2);
    }

    #[tokio::test]
    async fn test_currencies_error_leaves_cache_empty() {
        let mut service = ExchangeService::new(MockProvider::failing(), EXPIRY);

        let result = service.get_currencies().await;
        assert!(matches!(result, Err(ServiceError::Transport(_))));
        assert!(service.cache().entries().is_empty());
        assert!(service.cache().last_refreshed().is_none());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Conversion
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_convert_requests_only_target_symbol() {
        let provider = MockProvider::new()
            .with_latest("EUR", 0.92)
            .with_latest("GBP", 0.79);
        let service = ExchangeService::new(provider, EXPIRY);

        let result = service
            .convert_currency(100.0, &code("USD"), &code("EUR"))
            .await
            .unwrap();

        assert!((result - 92.0).abs() < 1e-9);
        assert_eq!(
            service.provider().calls(),
            vec![Call::Latest {
                base: Some(code("USD")),
                symbols: vec![code("EUR")],
            }]
        );
    }

    #[tokio::test]
    async fn test_convert_identity_pair() {
        let provider = MockProvider::new().with_latest("USD", 1.0);
        let service = ExchangeService::new(provider, EXPIRY);

        let result = service
            .convert_currency(42.5, &code("USD"), &code("USD"))
            .await
            .unwrap();
        assert_eq!(result, 42.5);
    }

    #[tokio::test]
    async fn test_convert_is_not_rounded() {
        let provider = MockProvider::new().with_latest("JPY", 157.123456);
        let service = ExchangeService::new(provider, EXPIRY);

        let result = service
            .convert_currency(3.0, &code("USD"), &code("JPY"))
            .await
            .unwrap();
        assert!((result - 471.370368).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_convert_missing_symbol_is_service_error() {
        let provider = MockProvider::new().with_latest("GBP", 0.79);
        let service = ExchangeService::new(provider, EXPIRY);

        let result = service
            .convert_currency(100.0, &code("USD"), &code("EUR"))
            .await;
        match result {
            Err(ServiceError::MissingRate { base, symbol }) => {
                assert_eq!(base, code("USD"));
                assert_eq!(symbol, code("EUR"));
            }
            other => panic!("expected MissingRate, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_convert_propagates_provider_error() {
        let service = ExchangeService::new(MockProvider::failing(), EXPIRY);
        let result = service
            .convert_currency(1.0, &code("USD"), &code("EUR"))
            .await;
        assert!(matches!(result, Err(ServiceError::Transport(_))));
        // Single attempt, no retry.
        assert_eq!(service.provider().calls().len(), 1);
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Trend Analysis
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_trends_window_and_request() {
        let service = ExchangeService::new(MockProvider::new(), EXPIRY);
        let symbols = vec![code("EUR"), code("GBP")];

        let trends = service
            .get_rate_trends_until(&code("USD"), &symbols, 7, day(10))
            .await
            .unwrap();

        assert_eq!(trends.start_date, day(3));
        assert_eq!(trends.end_date, day(10));
        assert_eq!(trends.days, 7);
        assert_eq!(
            service.provider().calls(),
            vec![Call::TimeSeries {
                start: day(3),
                end: Some(day(10)),
                base: Some(code("USD")),
                symbols,
            }]
        );
    }

    #[tokio::test]
    async fn test_trends_statistics() {
        let provider = MockProvider::new()
            .with_point(day(3), "EUR", 0.90)
            .with_point(day(4), "EUR", 0.92)
            .with_point(day(5), "EUR", 0.94)
            .with_point(day(6), "EUR", 0.92);
        let service = ExchangeService::new(provider, EXPIRY);

        let trends = service
            .get_rate_trends_until(&code("USD"), &[code("EUR")], 7, day(10))
            .await
            .unwrap();

        let eur = trends.get(&code("EUR")).unwrap();
        assert_eq!(eur.points.len(), 4);
        let stats = eur.stats.unwrap();
        assert!((stats.mean - 0.92).abs() < 1e-9);
        assert_eq!(stats.min, 0.90);
        assert_eq!(stats.max, 0.94);
        assert!((stats.std_dev.unwrap() - 0.01633).abs() < 1e-5);
    }

    #[tokio::test]
    async fn test_trends_drop_points_outside_requested_window() {
        let provider = MockProvider::new()
            .with_point(day(1), "EUR", 0.50)
            .with_point(day(3), "EUR", 0.90)
            .with_point(day(10), "EUR", 0.94)
            .with_point(day(12), "EUR", 1.50);
        let service = ExchangeService::new(provider, EXPIRY);

        let trends = service
            .get_rate_trends_until(&code("USD"), &[code("EUR")], 7, day(10))
            .await
            .unwrap();

        let eur = trends.get(&code("EUR")).unwrap();
        assert_eq!(eur.points, vec![(day(3), 0.90), (day(10), 0.94)]);
        let stats = eur.stats.unwrap();
        assert_eq!(stats.min, 0.90);
        assert_eq!(stats.max, 0.94);
    }

    #[tokio::test]
    async fn test_trends_skip_missing_dates_per_symbol() {
        let provider = MockProvider::new()
            .with_point(day(3), "EUR", 0.90)
            .with_point(day(3), "GBP", 0.80)
            .with_point(day(4), "EUR", 0.94)
            .with_point(day(5), "GBP", 0.82);
        let service = ExchangeService::new(provider, EXPIRY);

        let trends = service
            .get_rate_trends_until(&code("USD"), &[code("GBP"), code("EUR")], 7, day(10))
            .await
            .unwrap();

        let order: Vec<&str> = trends.trends.iter().map(|t| t.symbol.as_str()).collect();
        assert_eq!(order, vec!["GBP", "EUR"]);

        let gbp = trends.get(&code("GBP")).unwrap();
        assert_eq!(gbp.points, vec![(day(3), 0.80), (day(5), 0.82)]);
        assert!((gbp.stats.unwrap().mean - 0.81).abs() < 1e-9);

        let eur = trends.get(&code("EUR")).unwrap();
        assert_eq!(eur.points, vec![(day(3), 0.90), (day(4), 0.94)]);
    }

    #[tokio::test]
    async fn test_trends_empty_series_has_no_stats() {
        let provider = MockProvider::new().with_point(day(4), "EUR", 0.91);
        let service = ExchangeService::new(provider, EXPIRY);

        let trends = service
            .get_rate_trends_until(&code("USD"), &[code("EUR"), code("CHF")], 7, day(10))
            .await
            .unwrap();

        let chf = trends.get(&code("CHF")).unwrap();
        assert!(chf.points.is_empty());
        assert!(chf.stats.is_none());

        let eur = trends.get(&code("EUR")).unwrap().stats.unwrap();
        assert_eq!(eur.count, 1);
        assert!(eur.std_dev.is_none());
    }

    #[tokio::test]
    async fn test_trends_propagate_provider_error() {
        let service = ExchangeService::new(MockProvider::failing(), EXPIRY);
        let result = service
            .get_rate_trends(&code("USD"), &[code("EUR")], 30)
            .await;
        assert!(matches!(result, Err(ServiceError::Transport(_))));
    }

    #[tokio::test]
    async fn test_trends_default_end_is_today() {
        let service = ExchangeService::new(MockProvider::new(), EXPIRY);
        let trends = service
            .get_rate_trends(&code("USD"), &[code("EUR")], 30)
            .await
            .unwrap();

        let today = chrono::Local::now().date_naive();
        // Allow for the date rolling over mid-test.
        assert!(trends.end_date == today || trends.end_date + chrono::Days::new(1) == today);
        assert_eq!(trends.end_date - trends.start_date, chrono::Duration::days(30));
    }
}
