//! Google Trends search interest.
//!
//! Every query goes through the explore endpoint first, which returns one
//! widget per view (timeseries, geo map, related queries) carrying the token
//! and request payload needed to fetch that view's data.

use super::to_record;
use crate::domain::errors::CollectorError;
use crate::domain::metrics::Record;
use crate::domain::ports::MetricsCollector;
use crate::infrastructure::core::fetch_text;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{error, warn};

const TIMEFRAME: &str = "today 5-y";
const HOST_LANGUAGE: &str = "en-US";
const TZ_OFFSET_MINUTES: &str = "360";
const SECONDS_PER_DAY: i64 = 86_400;

const TIMESERIES_WIDGET: &str = "TIMESERIES";
const GEO_MAP_WIDGET: &str = "GEO_MAP";
const RELATED_QUERIES_WIDGET: &str = "RELATED_QUERIES";

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    widgets: Vec<Widget>,
}

#[derive(Debug, Deserialize)]
struct Widget {
    id: String,
    token: String,
    request: Value,
}

#[derive(Debug, Deserialize)]
struct WidgetResponse<T> {
    default: T,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelineData {
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
pub struct TimelinePoint {
    pub time: String,
    pub value: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeoData {
    geo_map_data: Vec<GeoPoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub geo_name: String,
    pub value: Vec<i64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedLists {
    ranked_list: Vec<RankedList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedList {
    #[serde(default)]
    ranked_keyword: Vec<RankedKeyword>,
}

#[derive(Debug, Deserialize)]
pub struct RankedKeyword {
    pub query: String,
    pub value: i64,
}

/// Search interest summed over one UTC day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InterestPoint {
    pub date: i64,
    pub value: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionInterest {
    pub geo_name: String,
    pub value: i64,
}

/// A top related query; `value` is the relative interest, e.g. `"85%"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedQuery {
    pub index: usize,
    pub query: String,
    pub value: String,
}

#[derive(Debug, Serialize)]
struct TrendsSnapshot<T: Serialize> {
    value: Vec<T>,
}

// Responses are prefixed with an anti-XSSI guard such as `)]}',`
fn strip_guard_prefix(body: &str) -> &str {
    body.find('{').map(|start| &body[start..]).unwrap_or(body)
}

fn decode_guarded<T: DeserializeOwned>(body: &str, origin: &'static str) -> Result<T, CollectorError> {
    serde_json::from_str(strip_guard_prefix(body)).map_err(|e| CollectorError::decode(origin, e))
}

/// Buckets timeline points by UTC day and sums each bucket.
///
/// Rows are contiguous from the first to the last day; days without a data
/// point get 0.
pub fn daily_interest(points: Vec<TimelinePoint>) -> Result<Vec<InterestPoint>, CollectorError> {
    let mut days: BTreeMap<i64, i64> = BTreeMap::new();
    for point in points {
        let time = point
            .time
            .parse::<i64>()
            .map_err(|e| CollectorError::parse("timelineData.time", format!("{} ({})", point.time, e)))?;
        let day = time.div_euclid(SECONDS_PER_DAY) * SECONDS_PER_DAY;
        *days.entry(day).or_default() += point.value.first().copied().unwrap_or(0);
    }

    let (Some(&first), Some(&last)) = (days.keys().next(), days.keys().next_back()) else {
        return Ok(Vec::new());
    };
    Ok((first..=last)
        .step_by(SECONDS_PER_DAY as usize)
        .map(|date| InterestPoint {
            date,
            value: days.get(&date).copied().unwrap_or(0),
        })
        .collect())
}

/// Regions ordered by interest, highest first. Ties keep upstream order.
pub fn rank_regions(points: Vec<GeoPoint>) -> Vec<RegionInterest> {
    let mut regions: Vec<RegionInterest> = points
        .into_iter()
        .map(|p| RegionInterest {
            value: p.value.first().copied().unwrap_or(0),
            geo_name: p.geo_name,
        })
        .collect();
    regions.sort_by(|a, b| b.value.cmp(&a.value));
    regions
}

/// First `limit` related queries with their interest formatted as a percentage.
pub fn top_queries(keywords: Vec<RankedKeyword>, limit: usize) -> Vec<RelatedQuery> {
    keywords
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, keyword)| RelatedQuery {
            index,
            query: keyword.query,
            value: format!("{}%", keyword.value),
        })
        .collect()
}

/// Thin client over the unofficial Trends endpoints.
pub struct GoogleTrendsClient {
    client: Client,
    base_url: String,
}

impl GoogleTrendsClient {
    pub fn new(client: Client, base_url: String) -> Self {
        Self { client, base_url }
    }

    async fn explore(&self, term: &str) -> Result<Vec<Widget>, CollectorError> {
        // The explore API rejects requests that lack the landing-page cookie
        let landing = self
            .client
            .get(format!("{}/", self.base_url))
            .query(&[("geo", "US")]);
        if let Err(e) = fetch_text(landing).await {
            warn!("Google Trends cookie request failed: {}", e);
        }

        let payload = json!({
            "comparisonItem": [{"keyword": term, "time": TIMEFRAME, "geo": ""}],
            "category": 0,
            "property": ""
        })
        .to_string();
        let request = self
            .client
            .get(format!("{}/trends/api/explore", self.base_url))
            .query(&[
                ("hl", HOST_LANGUAGE),
                ("tz", TZ_OFFSET_MINUTES),
                ("req", payload.as_str()),
            ]);

        let body = fetch_text(request).await?;
        let explore: ExploreResponse = decode_guarded(&body, "google trends explore")?;
        Ok(explore.widgets)
    }

    async fn widget(&self, term: &str, id: &'static str) -> Result<Widget, CollectorError> {
        self.explore(term)
            .await?
            .into_iter()
            .find(|w| w.id.starts_with(id))
            .ok_or_else(|| CollectorError::decode("google trends explore", format!("no {} widget", id)))
    }

    async fn widget_data<T: DeserializeOwned>(
        &self,
        widget: &Widget,
        endpoint: &str,
        origin: &'static str,
    ) -> Result<T, CollectorError> {
        let payload = widget.request.to_string();
        let request = self
            .client
            .get(format!("{}/trends/api/widgetdata/{}", self.base_url, endpoint))
            .query(&[
                ("hl", HOST_LANGUAGE),
                ("tz", TZ_OFFSET_MINUTES),
                ("req", payload.as_str()),
                ("token", widget.token.as_str()),
            ]);

        let body = fetch_text(request).await?;
        let response: WidgetResponse<T> = decode_guarded(&body, origin)?;
        Ok(response.default)
    }

    pub async fn interest_over_time(&self, term: &str) -> Result<Vec<InterestPoint>, CollectorError> {
        let widget = self.widget(term, TIMESERIES_WIDGET).await?;
        let data: TimelineData = self
            .widget_data(&widget, "multiline", "google trends multiline")
            .await?;
        daily_interest(data.timeline_data)
    }

    pub async fn interest_by_region(&self, term: &str) -> Result<Vec<RegionInterest>, CollectorError> {
        let mut widget = self.widget(term, GEO_MAP_WIDGET).await?;
        if let Some(request) = widget.request.as_object_mut() {
            request.insert("resolution".to_string(), json!("COUNTRY"));
            request.insert("includeLowSearchVolumeGeos".to_string(), json!(false));
        }
        let data: GeoData = self
            .widget_data(&widget, "comparedgeo", "google trends comparedgeo")
            .await?;
        Ok(rank_regions(data.geo_map_data))
    }

    pub async fn related_queries(
        &self,
        term: &str,
        limit: usize,
    ) -> Result<Vec<RelatedQuery>, CollectorError> {
        let widget = self.widget(term, RELATED_QUERIES_WIDGET).await?;
        let data: RankedLists = self
            .widget_data(&widget, "relatedsearches", "google trends relatedsearches")
            .await?;
        // The first ranked list is "top", the second "rising"
        let top = data
            .ranked_list
            .into_iter()
            .next()
            .map(|list| list.ranked_keyword)
            .unwrap_or_default();
        Ok(top_queries(top, limit))
    }
}

// A failed query is stored as an empty `value`, not as a failed category
fn trends_record<T: Serialize>(result: Result<Vec<T>, CollectorError>) -> Result<Record, CollectorError> {
    match result {
        Ok(value) => to_record(&TrendsSnapshot { value }),
        Err(e) => {
            error!("Google returned an error: {}", e);
            let mut record = Record::new();
            record.insert("value".to_string(), Value::Object(Map::new()));
            Ok(record)
        }
    }
}

/// Daily search interest for the term.
pub struct InterestOverTimeCollector {
    trends: Arc<GoogleTrendsClient>,
    term: String,
}

impl InterestOverTimeCollector {
    pub fn new(trends: Arc<GoogleTrendsClient>, term: String) -> Self {
        Self { trends, term }
    }
}

#[async_trait]
impl MetricsCollector for InterestOverTimeCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        trends_record(self.trends.interest_over_time(&self.term).await)
    }
}

/// Search interest per country.
pub struct InterestByRegionCollector {
    trends: Arc<GoogleTrendsClient>,
    term: String,
}

impl InterestByRegionCollector {
    pub fn new(trends: Arc<GoogleTrendsClient>, term: String) -> Self {
        Self { trends, term }
    }
}

#[async_trait]
impl MetricsCollector for InterestByRegionCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        trends_record(self.trends.interest_by_region(&self.term).await)
    }
}

/// Top queries related to the term.
pub struct RelatedQueriesCollector {
    trends: Arc<GoogleTrendsClient>,
    term: String,
    limit: usize,
}

impl RelatedQueriesCollector {
    pub fn new(trends: Arc<GoogleTrendsClient>, term: String, limit: usize) -> Self {
        Self { trends, term, limit }
    }
}

#[async_trait]
impl MetricsCollector for RelatedQueriesCollector {
    async fn collect(&self) -> Result<Record, CollectorError> {
        trends_record(self.trends.related_queries(&self.term, self.limit).await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(time: i64, value: i64) -> TimelinePoint {
        TimelinePoint {
            time: time.to_string(),
            value: vec![value],
        }
    }

    #[test]
    fn test_daily_interest_sums_per_day() {
        let day = 1_672_531_200; // 2023-01-01
        let points = vec![
            point(day, 10),
            point(day + 3_600, 5),
            point(day + SECONDS_PER_DAY, 7),
        ];

        let daily = daily_interest(points).unwrap();
        assert_eq!(
            daily,
            vec![
                InterestPoint { date: day, value: 15 },
                InterestPoint {
                    date: day + SECONDS_PER_DAY,
                    value: 7
                },
            ]
        );
    }

    #[test]
    fn test_daily_interest_fills_missing_days_with_zero() {
        let day = 1_672_531_200;
        let weekly = vec![point(day, 40), point(day + 3 * SECONDS_PER_DAY, 60)];

        let daily = daily_interest(weekly).unwrap();
        let values: Vec<i64> = daily.iter().map(|p| p.value).collect();
        let dates: Vec<i64> = daily.iter().map(|p| p.date).collect();
        assert_eq!(values, vec![40, 0, 0, 60]);
        assert_eq!(
            dates,
            (0..4).map(|i| day + i * SECONDS_PER_DAY).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_daily_interest_empty_timeline() {
        assert!(daily_interest(Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn test_failed_query_keeps_empty_value() {
        let record = trends_record::<RegionInterest>(Err(CollectorError::Status {
            url: "https://trends.google.com/trends/api/explore".to_string(),
            status: 429,
        }))
        .unwrap();
        assert_eq!(Value::Object(record), json!({"value": {}}));
    }

    #[test]
    fn test_daily_interest_rejects_bad_time() {
        let points = vec![TimelinePoint {
            time: "yesterday".to_string(),
            value: vec![1],
        }];
        assert!(daily_interest(points).is_err());
    }

    #[test]
    fn test_rank_regions_descending() {
        let regions = rank_regions(vec![
            GeoPoint {
                geo_name: "Portugal".to_string(),
                value: vec![40],
            },
            GeoPoint {
                geo_name: "India".to_string(),
                value: vec![100],
            },
            GeoPoint {
                geo_name: "Chile".to_string(),
                value: vec![40],
            },
        ]);

        let names: Vec<&str> = regions.iter().map(|r| r.geo_name.as_str()).collect();
        assert_eq!(names, vec!["India", "Portugal", "Chile"]);
    }

    #[test]
    fn test_top_queries_limits_and_formats() {
        let keywords = (0..15)
            .map(|i| RankedKeyword {
                query: format!("query {}", i),
                value: 100 - i,
            })
            .collect();

        let top = top_queries(keywords, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(
            top[0],
            RelatedQuery {
                index: 0,
                query: "query 0".to_string(),
                value: "100%".to_string()
            }
        );
        assert_eq!(top[9].value, "91%");
    }

    #[test]
    fn test_guard_prefix_is_stripped() {
        let body = ")]}',\n{\"default\": {\"timelineData\": []}}";
        let response: WidgetResponse<TimelineData> = decode_guarded(body, "test").unwrap();
        assert!(response.default.timeline_data.is_empty());
    }

    #[test]
    fn test_region_rows_serialize_camel_case() {
        let row = RegionInterest {
            geo_name: "India".to_string(),
            value: 100,
        };
        assert_eq!(
            serde_json::to_value(&row).unwrap(),
            json!({"geoName": "India", "value": 100})
        );
    }
}
