use serde::Deserialize;

/// `?start=&end=` of the metric routes. Both optional, both inclusive.
#[derive(Debug, Deserialize)]
pub struct RangeQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeriesQuery {
    pub end: Option<String>,
    pub days: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: Option<String>,
}
