use std::{fmt, time::Duration};

/// Command line and environment configuration of the route cache.
#[derive(clap::Parser, Clone, Debug)]
pub struct Arguments {
    /// DynamoDB table holding cached routes.
    #[clap(long, env, default_value = "RouteCachingTable")]
    pub cached_routes_table_name: String,

    /// How long a written entry is kept before the table's TTL sweep may
    /// delete it. Independent of the bucket's blocks to live.
    #[clap(long, env, default_value = "2m", value_parser = humantime::parse_duration)]
    pub cached_routes_time_to_live: Duration,

    /// Timeout of a single cache request attempt.
    #[clap(long, env, default_value = "100ms", value_parser = humantime::parse_duration)]
    pub cached_routes_timeout: Duration,

    /// Delay before retrying a failed cache request.
    #[clap(long, env, default_value = "20ms", value_parser = humantime::parse_duration)]
    pub cached_routes_retry_backoff: Duration,

    /// Attempts per cache request, including the first one.
    #[clap(
        long,
        env,
        default_value = "2",
        value_parser = clap::value_parser!(u32).range(1..=2)
    )]
    pub cached_routes_max_attempts: u32,
}

impl fmt::Display for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            cached_routes_table_name,
            cached_routes_time_to_live,
            cached_routes_timeout,
            cached_routes_retry_backoff,
            cached_routes_max_attempts,
        } = self;

        writeln!(f, "cached_routes_table_name: {cached_routes_table_name}")?;
        writeln!(
            f,
            "cached_routes_time_to_live: {cached_routes_time_to_live:?}"
        )?;
        writeln!(f, "cached_routes_timeout: {cached_routes_timeout:?}")?;
        writeln!(
            f,
            "cached_routes_retry_backoff: {cached_routes_retry_backoff:?}"
        )?;
        writeln!(
            f,
            "cached_routes_max_attempts: {cached_routes_max_attempts}"
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, clap::Parser};

    #[test]
    fn defaults() {
        let args = Arguments::try_parse_from(["route-cache"]).unwrap();
        assert_eq!(args.cached_routes_table_name, "RouteCachingTable");
        assert_eq!(args.cached_routes_time_to_live, Duration::from_secs(120));
        assert_eq!(args.cached_routes_timeout, Duration::from_millis(100));
        assert_eq!(args.cached_routes_retry_backoff, Duration::from_millis(20));
        assert_eq!(args.cached_routes_max_attempts, 2);
    }

    #[test]
    fn parses_durations() {
        let args = Arguments::try_parse_from([
            "route-cache",
            "--cached-routes-table-name",
            "Routes",
            "--cached-routes-time-to-live",
            "5m",
            "--cached-routes-timeout",
            "250ms",
            "--cached-routes-max-attempts",
            "1",
        ])
        .unwrap();
        assert_eq!(args.cached_routes_table_name, "Routes");
        assert_eq!(args.cached_routes_time_to_live, Duration::from_secs(300));
        assert_eq!(args.cached_routes_timeout, Duration::from_millis(250));
        assert_eq!(args.cached_routes_max_attempts, 1);
        assert!(args.to_string().contains("cached_routes_table_name: Routes"));
    }

    #[test]
    fn at_most_one_retry() {
        assert!(
            Arguments::try_parse_from(["route-cache", "--cached-routes-max-attempts", "3"])
                .is_err()
        );
        assert!(
            Arguments::try_parse_from(["route-cache", "--cached-routes-max-attempts", "0"])
                .is_err()
        );
    }
}
