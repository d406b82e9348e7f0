// Proptest prelude: shared configuration for integration properties.
//
// Env knobs:
// - PROPTEST_CASES: number of cases per property (e.g. 16, 256).
// - PROPTEST_MAX_SHRINK_MS: optional cap for shrinking time in milliseconds.
//
// Generate valid scripts by construction; avoid prop_assume!.

pub fn proptest_prelude_config() -> proptest::prelude::ProptestConfig {
    let base = proptest::prelude::ProptestConfig::default();

    // Each case drives a full match through a database, so keep the default small
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(8)
        .max(1);

    let max_shrink_time = std::env::var("PROPTEST_MAX_SHRINK_MS")
        .ok()
        .and_then(|s| s.parse::<u32>().ok())
        .unwrap_or(base.max_shrink_time);

    proptest::prelude::ProptestConfig {
        // Integration binaries have no stable source path for regression files
        failure_persistence: None,
        cases,
        max_shrink_time,
        ..base
    }
}
