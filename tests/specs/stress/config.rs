//! Configuration specs
//!
//! Verify runner defaults can be loaded from TOML.

use crate::prelude::*;
use similar_asserts::assert_eq;

const CONFIG: &str = r#"
[confirm]
timeout = "250ms"

[stress]
iterations = 40
max_jitter = "0s"
timeout = "2s"
auto_confirm = false
"#;

#[test]
fn toml_overrides_runner_defaults() {
    let config = HarnessConfig::from_toml_str(CONFIG).unwrap();

    let runner = ConfirmationRunner::from_config(&config.confirm);
    assert_eq!(runner.timeout(), Duration::from_millis(250));
    assert_eq!(runner.expected_count(), 1);

    let stress = StressRunner::from_config(&config.stress);
    assert_eq!(stress.iterations(), 40);
    assert_eq!(stress.jitter(), Jitter::None);
    assert_eq!(stress.timeout(), Duration::from_secs(2));
    assert!(!stress.auto_confirm());
}

#[tokio::test(start_paused = true)]
async fn configured_stress_runner_drives_manual_signals() {
    let config = HarnessConfig::from_toml_str(CONFIG).unwrap();

    let results = StressRunner::from_config(&config.stress)
        .perform(|confirmation| async move {
            confirmation.signal();
            Ok::<_, SpecError>(())
        })
        .await
        .unwrap();

    assert_eq!(results.len(), 40);
}
