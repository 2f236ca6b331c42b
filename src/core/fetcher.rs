use crate::config::EcbConfig;
use crate::core::sdmx::parse_observations;
use crate::domain::{mean_rate, Currency, Observation};
use crate::utils::error::{RateError, Result};
use crate::utils::validation::validate_currency;
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::Client;
use url::Url;

const SDMX_GENERIC_DATA: &str = "application/vnd.sdmx.genericdata+xml;version=2.1";

/// Client for the ECB `EXR` (exchange rates) dataflow.
///
/// Every operation is a single GET followed by a parse; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct RateFetcher {
    client: Client,
    base_url: Url,
    user_agent: String,
}

impl RateFetcher {
    pub fn new(config: &EcbConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url).map_err(|e| RateError::InvalidConfigValue {
            field: "source.base_url".to_string(),
            value: config.base_url.clone(),
            reason: format!("Invalid URL format: {}", e),
        })?;

        let client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            client,
            base_url,
            user_agent: config.user_agent.clone(),
        })
    }

    /// Rate for `currency` on a single `date`.
    ///
    /// EUR answers 1.0 without touching the network. A response without a usable
    /// observation is reported as [`RateError::NoData`].
    pub async fn fetch_point(&self, currency: &str, date: &str) -> Result<f64> {
        let currency = validate_currency(currency)?;
        if currency.is_base() {
            return Ok(1.0);
        }

        let observations = self.fetch_observations(currency, date, date).await?;
        observations
            .first()
            .map(|obs| obs.rate)
            .ok_or_else(|| RateError::NoData {
                currency: currency.to_string(),
                period: date.to_string(),
            })
    }

    /// All observations between `start` and `end`, in the order the service returned them.
    ///
    /// For EUR this is `[(start, 1.0)]`. Dates are handed to the service as given; whether
    /// the bounds are inclusive is up to the service.
    pub async fn fetch_range(
        &self,
        currency: &str,
        start: &str,
        end: &str,
    ) -> Result<Vec<Observation>> {
        let currency = validate_currency(currency)?;
        if currency.is_base() {
            return Ok(vec![Observation::new(start, 1.0)]);
        }

        self.fetch_observations(currency, start, end).await
    }

    /// Mean rate over the calendar year.
    ///
    /// An empty year and a failed request both come back as `Ok(None)`.
    pub async fn fetch_annual_average(&self, currency: &str, year: i32) -> Result<Option<f64>> {
        let start = format!("{:04}-01-01", year);
        let end = format!("{:04}-12-31", year);
        self.fetch_range_average(currency, &start, &end).await
    }

    pub async fn fetch_range_average(
        &self,
        currency: &str,
        start: &str,
        end: &str,
    ) -> Result<Option<f64>> {
        match self.fetch_range(currency, start, end).await {
            Ok(observations) => {
                let mean = mean_rate(&observations);
                if mean.is_none() {
                    tracing::warn!("No observations for {} between {} and {}", currency, start, end);
                }
                Ok(mean)
            }
            Err(e) if e.is_request_failure() => {
                tracing::warn!(
                    "Treating failed request for {} between {} and {} as no data: {}",
                    currency,
                    start,
                    end,
                    e
                );
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// `{base}/data/EXR/D.{CURRENCY}.EUR.SP00.A`
    pub fn series_url(&self, currency: Currency) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| RateError::InvalidConfigValue {
                field: "source.base_url".to_string(),
                value: self.base_url.to_string(),
                reason: "URL cannot be used as a base".to_string(),
            })?
            .pop_if_empty()
            .extend(["data", "EXR", currency.series_key().as_str()]);
        Ok(url)
    }

    async fn fetch_observations(
        &self,
        currency: Currency,
        start: &str,
        end: &str,
    ) -> Result<Vec<Observation>> {
        let url = self.series_url(currency)?;
        tracing::debug!("Requesting {} ({} .. {})", url, start, end);

        let response = self
            .client
            .get(url.clone())
            .header(ACCEPT, SDMX_GENERIC_DATA)
            .header(USER_AGENT, self.user_agent.as_str())
            .query(&[("startPeriod", start), ("endPeriod", end)])
            .send()
            .await?;

        tracing::debug!("ECB response status: {}", response.status());

        if !response.status().is_success() {
            return Err(RateError::HttpStatus {
                status: response.status().as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let observations = parse_observations(&body)?;
        tracing::info!(
            "Fetched {} observations for {} ({} .. {})",
            observations.len(),
            currency,
            start,
            end
        );
        Ok(observations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fetcher(base_url: &str) -> RateFetcher {
        let config = EcbConfig {
            base_url: base_url.to_string(),
            ..EcbConfig::default()
        };
        RateFetcher::new(&config).unwrap()
    }

    #[test]
    fn test_series_url_with_service_prefix() {
        let url = fetcher("https://data-api.ecb.europa.eu/service/")
            .series_url(Currency::Usd)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://data-api.ecb.europa.eu/service/data/EXR/D.USD.EUR.SP00.A"
        );
    }

    #[test]
    fn test_series_url_without_trailing_slash() {
        let url = fetcher("http://127.0.0.1:9000")
            .series_url(Currency::Jpy)
            .unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/data/EXR/D.JPY.EUR.SP00.A");

        let url = fetcher("http://127.0.0.1:9000/service")
            .series_url(Currency::Gbp)
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://127.0.0.1:9000/service/data/EXR/D.GBP.EUR.SP00.A"
        );
    }

    #[test]
    fn test_rejects_unparseable_base_url() {
        let config = EcbConfig {
            base_url: "not a url".to_string(),
            ..EcbConfig::default()
        };
        assert!(matches!(
            RateFetcher::new(&config),
            Err(RateError::InvalidConfigValue { .. })
        ));
    }

    #[tokio::test]
    async fn test_eur_short_circuits() {
        // unroutable base: any request would fail
        let fetcher = fetcher("http://127.0.0.1:1");
        assert_eq!(fetcher.fetch_point("EUR", "2023-03-01").await.unwrap(), 1.0);
        assert_eq!(
            fetcher.fetch_range("EUR", "2023-03-01", "2023-03-31").await.unwrap(),
            vec![Observation::new("2023-03-01", 1.0)]
        );
        assert_eq!(
            fetcher.fetch_annual_average("EUR", 2023).await.unwrap(),
            Some(1.0)
        );
    }

    #[tokio::test]
    async fn test_invalid_currency_fails_before_request() {
        let fetcher = fetcher("http://127.0.0.1:1");
        assert!(matches!(
            fetcher.fetch_point("XYZ", "2023-03-01").await,
            Err(RateError::InvalidCurrency { .. })
        ));
        assert!(matches!(
            fetcher.fetch_range("XYZ", "2023-03-01", "2023-03-02").await,
            Err(RateError::InvalidCurrency { .. })
        ));
        assert!(matches!(
            fetcher.fetch_annual_average("XYZ", 2023).await,
            Err(RateError::InvalidCurrency { .. })
        ));
    }
}
