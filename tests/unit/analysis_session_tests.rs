/*!
 * Tests for the lookup session state machine: request sequencing,
 * stale-response rejection and save semantics
 */

use lexiread::analysis::{AnalysisSession, SessionState, WordAnalysis};
use lexiread::errors::ProviderError;

use crate::common::memory_store;

fn analysis(meaning: &str) -> WordAnalysis {
    WordAnalysis::new(meaning, "usage")
}

#[test]
fn test_requestIds_shouldBeStrictlyIncreasing() {
    let mut session = AnalysisSession::new();

    let a = session.begin("first", "ctx").unwrap();
    let b = session.begin("second", "ctx").unwrap();
    let c = session.begin("third", "ctx").unwrap();

    assert!(a.id < b.id);
    assert!(b.id < c.id);
}

#[test]
fn test_staleResponse_arrivingAfterNewerOutcome_shouldStayDiscarded() {
    let mut session = AnalysisSession::new();

    let slow = session.begin("tortoise", "ctx").unwrap();
    let fast = session.begin("hare", "ctx").unwrap();

    // The newer request resolves first
    assert!(session.complete(&fast, Ok(analysis("a fast animal"))));

    // The older response limps in afterwards and must not overwrite
    assert!(!session.complete(&slow, Ok(analysis("a slow animal"))));

    match session.state() {
        SessionState::Success { word, analysis, .. } => {
            assert_eq!(word.as_str(), "hare");
            assert_eq!(analysis.meaning, "a fast animal");
        }
        other => panic!("unexpected state: {:?}", other),
    }
}

#[test]
fn test_threeInterleavedRequests_onlyLatestObservable() {
    let mut session = AnalysisSession::new();

    let a = session.begin("alpha", "ctx").unwrap();
    let b = session.begin("beta", "ctx").unwrap();
    let c = session.begin("gamma", "ctx").unwrap();

    // Completion order: b, a, c
    assert!(!session.complete(&b, Ok(analysis("B"))));
    assert!(!session.complete(&a, Err(ProviderError::EmptyResponse)));
    assert!(session.complete(&c, Ok(analysis("C"))));

    match session.state() {
        SessionState::Success { word, .. } => assert_eq!(word.as_str(), "gamma"),
        other => panic!("unexpected state: {:?}", other),
    }
}

#[test]
fn test_cancel_shouldReturnToIdleAndInvalidateInFlight() {
    let mut session = AnalysisSession::new();
    let request = session.begin("whale", "ctx").unwrap();

    session.cancel();
    assert_eq!(*session.state(), SessionState::Idle);

    assert!(!session.complete(&request, Ok(analysis("too late"))));
    assert_eq!(*session.state(), SessionState::Idle);

    // The session is still usable after cancellation
    let fresh = session.begin("whale", "ctx").unwrap();
    assert!(session.complete(&fresh, Ok(analysis("a large marine mammal"))));
    assert!(session.state().is_success());
}

#[test]
fn test_failedLookup_shouldNotBeRetriedImplicitly() {
    let mut session = AnalysisSession::new();
    let request = session.begin("whale", "ctx").unwrap();

    session.complete(
        &request,
        Err(ProviderError::ConnectionError("refused".into())),
    );

    // No hidden retry: the state stays Failed until a fresh begin
    assert!(matches!(session.state(), SessionState::Failed { .. }));
}

#[test]
fn test_save_shouldUseSessionWordAndMeaning() {
    let mut session = AnalysisSession::new();
    let request = session.begin("Ephemeral", "ctx").unwrap();
    session.complete(&request, Ok(analysis("lasting a very short time")));

    let mut store = memory_store();
    assert!(session.save(&mut store).unwrap());

    let entries = store.list();
    assert_eq!(entries[0].key.as_str(), "ephemeral");
    assert_eq!(entries[0].definition, "lasting a very short time");
}

#[test]
fn test_save_whileLoadingOrIdle_shouldError() {
    let mut session = AnalysisSession::new();
    let mut store = memory_store();

    // Idle
    assert!(session.save(&mut store).is_err());

    // Loading
    session.begin("whale", "ctx").unwrap();
    assert!(session.save(&mut store).is_err());

    assert!(store.is_empty());
}
