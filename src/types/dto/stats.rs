use poem_openapi::Object;

/// Item counts for the admin dashboard
#[derive(Object, Debug)]
pub struct StatsBody {
    /// Lost items still being searched for
    pub lost_count: u64,

    /// Found items awaiting a claim
    pub found_count: u64,

    /// Items reunited with their owners
    pub reunited_count: u64,
}

/// Response wrapper for the stats endpoint
#[derive(Object, Debug)]
pub struct StatsResponse {
    pub success: bool,
    pub stats: StatsBody,
}
