use super::ScriptedPage;
use crate::config::PaginationPolicy;
use crate::crawlers::category::{PaginationOutcome, StopReason, expand};
use crate::crawlers::page::ControlState::{Absent, NotReady, Ready};

fn instant_policy(not_ready_retries: u32) -> PaginationPolicy {
    PaginationPolicy {
        wait_secs: 0,
        not_ready_retries,
        ..PaginationPolicy::default()
    }
}

#[tokio::test]
async fn test_absent_control_skips_expansion() {
    let mut page = ScriptedPage::new(Absent, vec![Ready, Ready]);

    let outcome = expand(&mut page, &instant_policy(0)).await;

    assert_eq!(
        outcome,
        PaginationOutcome {
            activations: 0,
            stop: StopReason::Absent
        }
    );
    assert_eq!(page.waits, 0);
}

#[tokio::test]
async fn test_activates_once_per_ready_state() {
    for k in [1, 3, 7] {
        let mut page = ScriptedPage::new(Ready, vec![Ready; k]);

        let outcome = expand(&mut page, &instant_policy(0)).await;

        assert_eq!(outcome.activations, k);
        assert_eq!(outcome.stop, StopReason::Absent);
        assert_eq!(page.activations, k);
        assert_eq!(page.waits, k + 1);
    }
}

#[tokio::test]
async fn test_not_ready_ends_loop_without_retries() {
    let mut page = ScriptedPage::new(Ready, vec![Ready, Ready, NotReady, Ready]);

    let outcome = expand(&mut page, &instant_policy(0)).await;

    assert_eq!(outcome.activations, 2);
    assert_eq!(outcome.stop, StopReason::NotReady);
}

#[tokio::test]
async fn test_not_ready_retried_within_budget() {
    let script = vec![Ready, NotReady, NotReady, Ready, NotReady, Ready];
    let mut page = ScriptedPage::new(Ready, script);

    let outcome = expand(&mut page, &instant_policy(2)).await;

    // The budget resets after each successful activation
    assert_eq!(outcome.activations, 3);
    assert_eq!(outcome.stop, StopReason::Absent);
}

#[tokio::test]
async fn test_retry_budget_exhausted() {
    let mut page = ScriptedPage::new(NotReady, vec![NotReady, NotReady, NotReady, Ready]);

    let outcome = expand(&mut page, &instant_policy(2)).await;

    assert_eq!(outcome.activations, 0);
    assert_eq!(outcome.stop, StopReason::NotReady);
    assert_eq!(page.waits, 3);
}

#[tokio::test]
async fn test_rejected_click_is_swallowed() {
    let mut page = ScriptedPage::new(Ready, vec![Ready, Ready]);
    page.reject_clicks = true;

    let outcome = expand(&mut page, &instant_policy(0)).await;

    assert_eq!(outcome.activations, 0);
    assert_eq!(outcome.stop, StopReason::ActivationFailed);
}

#[tokio::test]
async fn test_activation_limit() {
    let mut page = ScriptedPage::new(Ready, vec![Ready; 10]);
    let policy = PaginationPolicy {
        max_activations: 4,
        ..instant_policy(0)
    };

    let outcome = expand(&mut page, &policy).await;

    assert_eq!(outcome.activations, 4);
    assert_eq!(outcome.stop, StopReason::LimitReached);
}
