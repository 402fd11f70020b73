/*!
 * Tests for provider implementations and shared reply parsing
 */

use lexiread::analysis::{FailureKind, LookupError, WordAnalysis};
use lexiread::providers::mock::MockProvider;
use lexiread::providers::{parse_meaning_context, AnalysisProvider};

#[test]
fn test_parseMeaningContext_withCanonicalReply_shouldExtractBothFields() {
    let reply = "meaning: a happy accident\ncontext: used ironically by the narrator";
    let analysis = parse_meaning_context(reply);

    assert_eq!(analysis.meaning, "a happy accident");
    assert_eq!(analysis.context, "used ironically by the narrator");
}

#[test]
fn test_parseMeaningContext_withExtraWhitespace_shouldTrimFields() {
    let reply = "meaning:   a happy accident  \n\ncontext:\n  ironic usage  ";
    let analysis = parse_meaning_context(reply);

    assert_eq!(analysis.meaning, "a happy accident");
    assert_eq!(analysis.context, "ironic usage");
}

#[test]
fn test_parseMeaningContext_withFreeformReply_shouldFallBackToMeaningOnly() {
    let analysis = parse_meaning_context("The word simply means a happy accident.");

    assert_eq!(analysis.meaning, "The word simply means a happy accident.");
    assert_eq!(
        analysis.context,
        "Context could not be extracted due to unexpected format."
    );
}

#[tokio::test]
async fn test_mockProvider_behaviors_shouldMapToFailureTaxonomy() {
    let cases: Vec<(MockProvider, FailureKind)> = vec![
        (MockProvider::unreachable(), FailureKind::Network),
        (MockProvider::rejecting(), FailureKind::Rejected),
        (MockProvider::empty(), FailureKind::NoResult),
    ];

    for (provider, expected) in cases {
        let error = provider.analyze("whale", "ctx").await.unwrap_err();
        assert_eq!(
            LookupError::from(error).kind,
            expected,
            "wrong kind for {:?}",
            provider
        );
    }
}

#[tokio::test]
async fn test_mockProvider_slow_shouldStillSucceed() {
    let provider = MockProvider::slow(10);
    let analysis = provider.analyze("whale", "ctx").await.unwrap();
    assert!(analysis.meaning.contains("whale"));
}

#[tokio::test]
async fn test_mockProvider_customAnalysis_shouldDriveScriptedResults() {
    let provider = MockProvider::working().with_custom_analysis(|word, context| {
        WordAnalysis::new(
            format!("scripted meaning of {word}"),
            format!("seen in: {context}"),
        )
    });

    let analysis = provider.analyze("whale", "the whale breached").await.unwrap();
    assert_eq!(analysis.meaning, "scripted meaning of whale");
    assert_eq!(analysis.context, "seen in: the whale breached");
}
