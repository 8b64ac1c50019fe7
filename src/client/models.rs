//! Response models of the prediction service.
//!
//! Field naming follows the snake_case contract of `/api/predict`; the
//! camelCase spellings used by older front ends are accepted as aliases.

use base64ct::{Base64, Encoding};
use serde::{Deserialize, Serialize};

use crate::client::format::{format_number, format_percent};

/// One `/api/search` hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub symbol: String,
    pub name: String,
}

/// One row of the trending or top-losers panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    pub change: String, // e.g. "+1.25%" or "-0.4%"
}

impl StockQuote {
    pub fn price_label(&self) -> String {
        format!("${:.2}", self.price)
    }

    pub fn is_loss(&self) -> bool {
        self.change.trim_start().starts_with('-')
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum QuoteListPayload {
    List(Vec<StockQuote>),
    Wrapped { stocks: Vec<StockQuote> },
}

/// Accepts `[...]` or `{"stocks": [...]}`; anything else is `None`.
pub fn parse_quote_list(value: serde_json::Value) -> Option<Vec<StockQuote>> {
    match serde_json::from_value::<QuoteListPayload>(value).ok()? {
        QuoteListPayload::List(quotes) => Some(quotes),
        QuoteListPayload::Wrapped { stocks } => Some(stocks),
    }
}

/// A base64-encoded PNG chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Chart(String);

impl Chart {
    pub fn new(base64: impl Into<String>) -> Self {
        Self(base64.into())
    }

    pub fn as_base64(&self) -> &str {
        &self.0
    }

    pub fn data_uri(&self) -> String {
        format!("data:image/png;base64,{}", self.0)
    }

    pub fn decode_png(&self) -> Result<Vec<u8>, base64ct::Error> {
        Base64::decode_vec(self.0.trim())
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    NextDays,
    Candlestick,
    OneYear,
    PriceComparison,
}

impl ChartKind {
    /// Heading for the chart; the forecast chart names the horizon it covers.
    pub fn title(self, days: u32) -> String {
        match self {
            ChartKind::NextDays if days == 1 => "Next Day Price Prediction".into(),
            ChartKind::NextDays => format!("Next {days} Days Price Prediction"),
            ChartKind::Candlestick => "Candlestick Chart".into(),
            ChartKind::OneYear => "1-Year Actual vs Predicted".into(),
            ChartKind::PriceComparison => "Original vs Predicted Prices".into(),
        }
    }
}

pub const NO_INFO: &str = "No info available";
const NOT_AVAILABLE: &str = "N/A";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CompanyInfo {
    Details(Box<CompanyDetails>),
    Summary(String),
}

impl CompanyInfo {
    pub fn is_available(&self) -> bool {
        match self {
            CompanyInfo::Details(_) => true,
            CompanyInfo::Summary(s) => !s.trim().is_empty() && s != NO_INFO,
        }
    }
}

/// A company figure. The upstream service puts `"N/A"` (or other text) in
/// place of numbers it could not look up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum InfoValue {
    Number(f64),
    Text(String),
}

impl InfoValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            InfoValue::Number(n) => Some(*n),
            InfoValue::Text(_) => None,
        }
    }

    fn render(&self, number: impl Fn(f64) -> String) -> String {
        match self {
            InfoValue::Number(n) => number(*n),
            InfoValue::Text(t) if t.trim().is_empty() => NOT_AVAILABLE.into(),
            InfoValue::Text(t) => t.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDetails {
    pub name: Option<String>,
    pub description: Option<String>,
    pub sector: Option<String>,
    pub industry: Option<String>,
    pub website: Option<String>,
    pub market_cap: Option<InfoValue>,
    pub previous_close: Option<InfoValue>,
    pub open: Option<InfoValue>,
    pub day_high: Option<InfoValue>,
    pub day_low: Option<InfoValue>,
    pub dividend_rate: Option<InfoValue>,
    pub dividend_yield: Option<InfoValue>,
    pub ipo_date: Option<String>,
    pub profit_margins: Option<InfoValue>,
    pub beta: Option<InfoValue>,
    pub risk: Option<serde_json::Value>,
}

impl CompanyDetails {
    /// Label/value pairs in display order. Missing values show as `N/A`.
    pub fn rows(&self) -> Vec<(&'static str, String)> {
        let text = |v: &Option<String>| v.clone().unwrap_or_else(|| NOT_AVAILABLE.into());
        let number = |v: &Option<InfoValue>| {
            v.as_ref()
                .map(|v| v.render(format_number))
                .unwrap_or_else(|| NOT_AVAILABLE.into())
        };
        let percent = |v: &Option<InfoValue>| {
            v.as_ref()
                .map(|v| v.render(format_percent))
                .unwrap_or_else(|| NOT_AVAILABLE.into())
        };
        let plain = |v: &Option<InfoValue>| {
            v.as_ref()
                .map(|v| v.render(|n| n.to_string()))
                .unwrap_or_else(|| NOT_AVAILABLE.into())
        };
        let risk = match &self.risk {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(serde_json::Value::Null) | None => NOT_AVAILABLE.into(),
            Some(other) => other.to_string(),
        };

        vec![
            ("Name", text(&self.name)),
            ("Description", text(&self.description)),
            ("Sector", text(&self.sector)),
            ("Industry", text(&self.industry)),
            ("Website", text(&self.website)),
            ("Market Cap", number(&self.market_cap)),
            ("Previous Close", number(&self.previous_close)),
            ("Open", number(&self.open)),
            ("Day High", number(&self.day_high)),
            ("Day Low", number(&self.day_low)),
            ("Dividend Rate", number(&self.dividend_rate)),
            ("Dividend Yield", percent(&self.dividend_yield)),
            ("IPO Date", text(&self.ipo_date)),
            ("Profit Margins", percent(&self.profit_margins)),
            ("Beta", plain(&self.beta)),
            ("Risk", risk),
        ]
    }
}

/// An `info` payload that matches neither known shape is dropped rather than
/// failing the whole prediction.
fn lenient_info<'de, D>(deserializer: D) -> Result<Option<CompanyInfo>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(info) => Some(info),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring unreadable company info");
            None
        }
    }))
}

/// Body of `/api/predict`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PredictionResponse {
    #[serde(default)]
    pub predictions: Vec<f64>,
    #[serde(default, alias = "priceComparisonGraph", alias = "graph")]
    pub price_comparison_graph: Option<Chart>,
    #[serde(default, alias = "candlestickChart")]
    pub candlestick_chart: Option<Chart>,
    #[serde(default, alias = "oneYearComparisonChart")]
    pub one_year_comparison_chart: Option<Chart>,
    #[serde(default, alias = "next30DaysChart")]
    pub next_30_days_chart: Option<Chart>,
    #[serde(default, deserialize_with = "lenient_info")]
    pub info: Option<CompanyInfo>,
    #[serde(default)]
    pub error: Option<String>,
}

impl PredictionResponse {
    /// Non-empty charts in display order.
    pub fn charts(&self) -> Vec<(ChartKind, &Chart)> {
        [
            (ChartKind::NextDays, &self.next_30_days_chart),
            (ChartKind::Candlestick, &self.candlestick_chart),
            (ChartKind::OneYear, &self.one_year_comparison_chart),
            (ChartKind::PriceComparison, &self.price_comparison_graph),
        ]
        .into_iter()
        .filter_map(|(kind, chart)| chart.as_ref().filter(|c| !c.is_empty()).map(|c| (kind, c)))
        .collect()
    }

    pub fn company_info(&self) -> Option<&CompanyInfo> {
        self.info.as_ref().filter(|info| info.is_available())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn quote_list_accepts_both_shapes() {
        let quote = json!({ "symbol": "AAPL", "price": 189.5, "change": "+1.2%" });

        let bare = parse_quote_list(json!([quote.clone()])).unwrap();
        assert_eq!(bare.len(), 1);
        assert_eq!(bare[0].symbol, "AAPL");

        let wrapped = parse_quote_list(json!({ "stocks": [quote] })).unwrap();
        assert_eq!(wrapped, bare);

        assert_eq!(parse_quote_list(json!({ "stocks": [] })), Some(vec![]));
    }

    #[test]
    fn quote_list_rejects_other_shapes() {
        assert_eq!(parse_quote_list(json!({ "error": "rate limited" })), None);
        assert_eq!(parse_quote_list(json!("nope")), None);
        assert_eq!(parse_quote_list(json!(null)), None);
        assert_eq!(parse_quote_list(json!({ "stocks": "soon" })), None);
    }

    #[test]
    fn quote_labels() {
        let q = StockQuote {
            symbol: "BA".into(),
            price: 201.0,
            change: "-0.75%".into(),
        };
        assert_eq!(q.price_label(), "$201.00");
        assert!(q.is_loss());
    }

    #[test]
    fn prediction_snake_case_contract() {
        let body = json!({
            "predictions": [190.1, 191.7],
            "price_comparison_graph": "aGVsbG8=",
            "candlestick_chart": "d29ybGQ=",
            "info": { "name": "Apple Inc.", "marketCap": 2.9e12, "dividendYield": 0.0054 }
        });
        let resp: PredictionResponse = serde_json::from_value(body).unwrap();

        assert_eq!(resp.predictions, vec![190.1, 191.7]);
        let kinds: Vec<ChartKind> = resp.charts().into_iter().map(|(k, _)| k).collect();
        assert_eq!(kinds, vec![ChartKind::Candlestick, ChartKind::PriceComparison]);
        assert_eq!(
            resp.price_comparison_graph.as_ref().unwrap().decode_png().unwrap(),
            b"hello"
        );
        match resp.company_info() {
            Some(CompanyInfo::Details(d)) => {
                assert_eq!(d.name.as_deref(), Some("Apple Inc."));
                assert_eq!(d.market_cap.as_ref().and_then(InfoValue::as_f64), Some(2.9e12));
            }
            other => panic!("unexpected info: {other:?}"),
        }
    }

    #[test]
    fn prediction_camel_case_aliases() {
        let body = json!({
            "priceComparisonGraph": "aGk=",
            "next30DaysChart": "aGk=",
            "oneYearComparisonChart": "aGk="
        });
        let resp: PredictionResponse = serde_json::from_value(body).unwrap();
        assert!(resp.price_comparison_graph.is_some());
        assert!(resp.next_30_days_chart.is_some());
        assert!(resp.one_year_comparison_chart.is_some());
        assert_eq!(resp.charts()[0].0, ChartKind::NextDays);
    }

    #[test]
    fn legacy_graph_field_maps_to_price_comparison() {
        let resp: PredictionResponse =
            serde_json::from_value(json!({ "graph": "aGk=", "predictions": [] })).unwrap();
        assert_eq!(resp.price_comparison_graph, Some(Chart::new("aGk=")));
    }

    #[test]
    fn info_summary_string() {
        let resp: PredictionResponse =
            serde_json::from_value(json!({ "info": "Designs phones." })).unwrap();
        assert_eq!(
            resp.company_info(),
            Some(&CompanyInfo::Summary("Designs phones.".into()))
        );

        let none: PredictionResponse =
            serde_json::from_value(json!({ "info": "No info available" })).unwrap();
        assert!(none.company_info().is_none());
    }

    #[test]
    fn empty_charts_are_skipped() {
        let resp: PredictionResponse =
            serde_json::from_value(json!({ "candlestick_chart": "", "next_30_days_chart": null }))
                .unwrap();
        assert!(resp.charts().is_empty());
    }

    #[test]
    fn chart_data_uri() {
        let chart = Chart::new("iVBORw0KGgo=");
        assert_eq!(chart.data_uri(), "data:image/png;base64,iVBORw0KGgo=");
        assert_eq!(&chart.decode_png().unwrap()[1..4], b"PNG");
        assert!(Chart::new("***").decode_png().is_err());
    }

    #[test]
    fn details_rows_fill_missing_values() {
        let details = CompanyDetails {
            name: Some("Apple Inc.".into()),
            market_cap: Some(InfoValue::Number(2_900_000_000_000.0)),
            dividend_yield: Some(InfoValue::Number(0.0054)),
            beta: Some(InfoValue::Number(1.25)),
            risk: Some(json!(3)),
            ..Default::default()
        };
        let rows = details.rows();
        assert_eq!(rows.len(), 16);
        assert_eq!(rows[0], ("Name", "Apple Inc.".to_string()));
        assert_eq!(rows[3], ("Industry", "N/A".to_string()));
        assert_eq!(rows[5], ("Market Cap", "2,900,000,000,000".to_string()));
        assert_eq!(rows[11], ("Dividend Yield", "0.54%".to_string()));
        assert_eq!(rows[14], ("Beta", "1.25".to_string()));
        assert_eq!(rows[15], ("Risk", "3".to_string()));
    }

    #[test]
    fn placeholder_company_info_keeps_charts() {
        // Shape returned when the company lookup fails upstream.
        let body = json!({
            "candlestick_chart": "aGk=",
            "info": {
                "name": "N/A",
                "sector": "N/A",
                "industry": "N/A",
                "website": "N/A",
                "description": "N/A",
                "marketCap": "N/A"
            }
        });
        let resp: PredictionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(resp.charts().len(), 1);

        let Some(CompanyInfo::Details(details)) = resp.company_info() else {
            panic!("expected details, got {:?}", resp.info);
        };
        assert_eq!(details.market_cap, Some(InfoValue::Text("N/A".into())));
        let rows = details.rows();
        assert!(rows.iter().all(|(_, value)| value == "N/A"));
        assert_eq!(rows[5], ("Market Cap", "N/A".to_string()));
    }

    #[test]
    fn unreadable_info_is_dropped() {
        let resp: PredictionResponse = serde_json::from_value(json!({
            "next_30_days_chart": "aGk=",
            "info": { "name": ["not", "a", "string"] }
        }))
        .unwrap();
        assert_eq!(resp.info, None);
        assert_eq!(resp.charts().len(), 1);

        let resp: PredictionResponse =
            serde_json::from_value(json!({ "info": 42, "predictions": [1.0] })).unwrap();
        assert_eq!(resp.info, None);
        assert_eq!(resp.predictions, vec![1.0]);
    }

    #[test]
    fn forecast_title_follows_horizon() {
        assert_eq!(ChartKind::NextDays.title(30), "Next 30 Days Price Prediction");
        assert_eq!(ChartKind::NextDays.title(7), "Next 7 Days Price Prediction");
        assert_eq!(ChartKind::NextDays.title(1), "Next Day Price Prediction");
        assert_eq!(ChartKind::Candlestick.title(365), "Candlestick Chart");
    }
}
