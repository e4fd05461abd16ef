//! End-to-end draft lifecycle: write-many, read-on-open, clear-on-complete.

use std::time::Duration;

use pretty_assertions::assert_eq;
use reframe_core::Config;
use reframe_core::FlowEngine;
use reframe_core::NavigationPolicy;
use reframe_core::has_persisted_draft;
use reframe_core::persisted_draft_timestamp;
use reframe_protocol::EmotionKind;
use reframe_protocol::FormOp;
use reframe_protocol::SchemaMode;
use tempfile::tempdir;

fn config(home: std::path::PathBuf) -> Config {
    Config {
        home,
        autosave_debounce_ms: 25,
        navigation: NavigationPolicy::Gated,
        crisis_scan_min_len: 10,
    }
}

async fn fill_required(engine: &mut FlowEngine) {
    for op in [
        FormOp::SetSituation {
            text: "I snapped at my partner over nothing and regretted it".to_string(),
        },
        FormOp::SetInitialEmotion { emotion: EmotionKind::Guilt, intensity: 7 },
        FormOp::AddAutomaticThought,
        FormOp::UpdateAutomaticThought {
            index: 0,
            thought: "I always ruin the evening".to_string(),
            credibility: 8,
        },
        FormOp::SetCoreBelief { text: "I am too much for people".to_string(), credibility: 6 },
        FormOp::SetSchemaMode {
            mode: SchemaMode::AngryChild,
            selected: true,
            intensity: Some(7),
        },
        FormOp::AnswerChallengeQuestion {
            index: 0,
            answer: "One sharp sentence is not the whole evening".to_string(),
        },
    ] {
        engine.apply(op).await;
    }
}

#[tokio::test]
async fn fresh_home_has_no_draft() -> anyhow::Result<()> {
    let home = tempdir()?;
    assert!(!has_persisted_draft(home.path()));
    assert_eq!(persisted_draft_timestamp(home.path()), None);
    Ok(())
}

#[tokio::test]
async fn debounced_write_appears_with_its_write_timestamp() -> anyhow::Result<()> {
    let home = tempdir()?;
    let mut engine = FlowEngine::open(&config(home.path().to_path_buf()), true);

    let before_first_write = chrono::Utc::now();
    engine
        .apply(FormOp::SetSituation { text: "first pass at describing it".to_string() })
        .await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    assert!(has_persisted_draft(home.path()));
    let first_stamp = persisted_draft_timestamp(home.path())
        .ok_or_else(|| anyhow::anyhow!("expected a draft timestamp"))?;
    assert!(first_stamp >= before_first_write);

    // A later edit moves the stamp to the newest write, not creation time.
    engine
        .apply(FormOp::SetSituation { text: "second, fuller description of it".to_string() })
        .await;
    tokio::time::sleep(Duration::from_millis(150)).await;
    let second_stamp = persisted_draft_timestamp(home.path())
        .ok_or_else(|| anyhow::anyhow!("expected a draft timestamp"))?;
    assert!(second_stamp >= first_stamp);
    engine.close().await;
    Ok(())
}

#[tokio::test]
async fn abandoned_session_rehydrates_on_next_open() -> anyhow::Result<()> {
    let home = tempdir()?;
    let cfg = config(home.path().to_path_buf());

    let mut engine = FlowEngine::open(&cfg, true);
    fill_required(&mut engine).await;
    engine.save_now().await;
    engine.close().await;

    let resumed = FlowEngine::open(&cfg, false);
    assert_eq!(
        resumed.entry().situation,
        "I snapped at my partner over nothing and regretted it"
    );
    // Hydration restores the full aggregate, not just scalars.
    assert_eq!(resumed.entry().automatic_thoughts.len(), 1);
    assert!(
        resumed
            .entry()
            .schema_modes
            .iter()
            .any(|m| m.mode == SchemaMode::AngryChild && m.selected)
    );

    let fresh = FlowEngine::open(&cfg, true);
    assert_eq!(fresh.entry().situation, "");
    Ok(())
}

#[tokio::test]
async fn completing_the_flow_clears_the_draft() -> anyhow::Result<()> {
    let home = tempdir()?;
    let mut engine = FlowEngine::open(&config(home.path().to_path_buf()), true);
    fill_required(&mut engine).await;
    engine.save_now().await;
    assert!(has_persisted_draft(home.path()));

    engine.submit(Box::new(|_| Ok(()))).await?;
    assert!(!has_persisted_draft(home.path()));
    Ok(())
}

#[tokio::test]
async fn draft_round_trip_preserves_the_entry() -> anyhow::Result<()> {
    use reframe_core::DraftFile;
    use reframe_core::DraftStore;
    use reframe_core::FileDraftStore;

    let home = tempdir()?;
    let store = FileDraftStore::new(home.path().to_path_buf());

    let mut entry = reframe_protocol::DiaryEntry::default();
    entry.situation = "a full entry with nested state".to_string();
    entry.initial_emotions.set(EmotionKind::Sadness, 5);
    entry.schema_reflection.enabled = true;
    entry.schema_reflection.questions[2].answer = "it echoes school".to_string();
    entry.additional_questions.push(reframe_protocol::AdditionalQuestion {
        question: "What would I tell a colleague?".to_string(),
        answer: "The same grace I deny myself".to_string(),
    });

    let draft = DraftFile { last_modified: chrono::Utc::now(), entry: entry.clone() };
    store.save(&draft)?;
    let loaded = store.load()?.ok_or_else(|| anyhow::anyhow!("draft should exist"))?;
    assert_eq!(loaded.entry, entry);
    Ok(())
}
