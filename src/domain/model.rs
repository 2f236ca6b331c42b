use crate::utils::error::RateError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currencies the ECB publishes euro reference rates for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Eur,
    Usd,
    Gbp,
    Jpy,
    Huf,
    Sek,
    Nok,
    Ron,
    Bgn,
    Chf,
    Czk,
    Pln,
    Dkk,
    Hrk,
    Cny,
    Inr,
    Krw,
    Try,
    Rub,
    Mxn,
    Cad,
    Brl,
    Aud,
}

impl Currency {
    pub const ALL: [Currency; 23] = [
        Currency::Eur,
        Currency::Usd,
        Currency::Gbp,
        Currency::Jpy,
        Currency::Huf,
        Currency::Sek,
        Currency::Nok,
        Currency::Ron,
        Currency::Bgn,
        Currency::Chf,
        Currency::Czk,
        Currency::Pln,
        Currency::Dkk,
        Currency::Hrk,
        Currency::Cny,
        Currency::Inr,
        Currency::Krw,
        Currency::Try,
        Currency::Rub,
        Currency::Mxn,
        Currency::Cad,
        Currency::Brl,
        Currency::Aud,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
            Currency::Gbp => "GBP",
            Currency::Jpy => "JPY",
            Currency::Huf => "HUF",
            Currency::Sek => "SEK",
            Currency::Nok => "NOK",
            Currency::Ron => "RON",
            Currency::Bgn => "BGN",
            Currency::Chf => "CHF",
            Currency::Czk => "CZK",
            Currency::Pln => "PLN",
            Currency::Dkk => "DKK",
            Currency::Hrk => "HRK",
            Currency::Cny => "CNY",
            Currency::Inr => "INR",
            Currency::Krw => "KRW",
            Currency::Try => "TRY",
            Currency::Rub => "RUB",
            Currency::Mxn => "MXN",
            Currency::Cad => "CAD",
            Currency::Brl => "BRL",
            Currency::Aud => "AUD",
        }
    }

    /// EUR is the quote base; its rate is always 1.
    pub fn is_base(self) -> bool {
        self == Currency::Eur
    }

    /// SDMX series key of the daily reference rate, e.g. `D.USD.EUR.SP00.A`.
    pub fn series_key(self) -> String {
        format!("D.{}.EUR.SP00.A", self.code())
    }
}

impl FromStr for Currency {
    type Err = RateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Currency::ALL
            .iter()
            .copied()
            .find(|currency| currency.code() == s)
            .ok_or_else(|| RateError::InvalidCurrency {
                code: s.to_string(),
            })
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// One published reference rate: units of currency per 1 EUR on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Observation {
    pub date: String,
    pub rate: f64,
}

impl Observation {
    pub fn new(date: impl Into<String>, rate: f64) -> Self {
        Self {
            date: date.into(),
            rate,
        }
    }
}

/// Arithmetic mean of the rates, `None` for an empty slice.
pub fn mean_rate(observations: &[Observation]) -> Option<f64> {
    if observations.is_empty() {
        return None;
    }
    let sum: f64 = observations.iter().map(|obs| obs.rate).sum();
    Some(sum / observations.len() as f64)
}
