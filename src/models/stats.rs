use serde::Serialize;

/// Dashboard figures for the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub users: i64,
    pub projects: i64,
    pub task_lists: i64,
    pub tasks: i64,
    pub roles: i64,
    pub charts: Charts,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Charts {
    pub tasks_by_status: Vec<ChartBucket>,
    pub tasks_by_priority: Vec<ChartBucket>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBucket {
    pub name: String,
    pub value: i64,
}

/// Orders buckets by count, largest first, then by name.
pub fn sort_buckets(buckets: &mut [ChartBucket]) {
    buckets.sort_by(|a, b| b.value.cmp(&a.value).then_with(|| a.name.cmp(&b.name)));
}
