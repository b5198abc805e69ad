#[derive(Debug, Clone, Copy)]
pub(super) enum StatsRange {
    Today,
    Last7,
    Last30,
    All,
}

pub(super) fn parse_range(input: &str) -> Result<StatsRange, String> {
    match input {
        "today" => Ok(StatsRange::Today),
        "last7" => Ok(StatsRange::Last7),
        "last30" => Ok(StatsRange::Last30),
        "all" => Ok(StatsRange::All),
        _ => Err(format!("SEC_INVALID_INPUT: unknown range={input}")),
    }
}
