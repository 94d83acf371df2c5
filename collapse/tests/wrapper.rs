mod common;

use std::sync::Arc;
use std::time::Duration;

use collapse::{
    CollapseError, Component, Outcome, Phase, PropertyUpdate, Props, WrapperConfig,
    start_collapsed, wrap,
};
use common::{Op, ScriptedTarget};
use futures::stream;
use livedom::{Content, Element, Height, Renderer, RendererConfig, TransitionTiming};
use serde_json::Value;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

fn paragraph(props: &Props) -> Element {
    let first = props
        .get("first")
        .and_then(Value::as_str)
        .unwrap_or("brunch.io");
    Element::div().children([Element::list_item(first), Element::list_item("crank.js")])
}

fn live_renderer() -> (Arc<Renderer>, CancellationToken) {
    let renderer = Arc::new(Renderer::new(RendererConfig::default()));
    let cancel = CancellationToken::new();
    renderer.spawn(cancel.clone());
    (renderer, cancel)
}

#[test]
fn test_start_collapsed_decision() {
    assert!(start_collapsed(None, true));
    assert!(start_collapsed(Some(true), true));
    assert!(!start_collapsed(Some(false), true));
    assert!(!start_collapsed(None, false));
    assert!(!start_collapsed(Some(true), false));
    assert!(!start_collapsed(Some(false), false));
}

#[test]
fn test_describe_wraps_component_in_container() {
    let wrapper = wrap(paragraph);
    let props = PropertyUpdate::new("x", false).prop("first", "express.js").props;

    let open = wrapper.describe("x", &props, false);
    assert_eq!(open.id, "x");
    assert_eq!(open.class_name(), "collapsible");
    assert_eq!(open.content.children().len(), 1);
    let items = open.content.children()[0].content.children();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0].content, Content::Text("express.js".into()));

    let shut = wrapper.describe("x", &props, true);
    assert_eq!(shut.class_name(), "collapsible collapsed");
}

#[tokio::test(start_paused = true)]
async fn test_first_collapsed_update_starts_collapsed() {
    let (renderer, cancel) = live_renderer();
    let mut instance = wrap(paragraph).instance(Arc::clone(&renderer), None);

    let outcome = instance.process(PropertyUpdate::new("x", true)).await.unwrap();

    assert!(matches!(outcome, Outcome::Collapsed));
    assert!(renderer.document().find("x").unwrap().has_class("collapsed"));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(renderer.query("x").unwrap().rendered_height(), 0);
    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_expand_collapse_expand_sequence() {
    let (renderer, cancel) = live_renderer();
    let mut instance = wrap(paragraph).instance(Arc::clone(&renderer), None);

    let first = instance.process(PropertyUpdate::new("x", false)).await.unwrap();
    assert!(matches!(first, Outcome::Expanded));
    let node = renderer.query("x").unwrap();
    assert!(!node.has_class("collapsed"));
    assert_eq!(node.height(), Some(Height::Px(40)));
    assert_eq!(instance.state().collapsed, Some(false));

    let second = instance.process(PropertyUpdate::new("x", true)).await.unwrap();
    assert!(matches!(second, Outcome::Collapsed));
    // The previous state was expanded, so the container is not pre-collapsed.
    assert!(!node.has_class("collapsed"));
    assert_eq!(node.height(), Some(Height::Px(0)));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(node.rendered_height(), 0);

    let third = instance.process(PropertyUpdate::new("x", false)).await.unwrap();
    assert!(matches!(third, Outcome::Expanded));
    assert_eq!(node.height(), Some(Height::Px(40)));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(node.rendered_height(), 40);

    let state = instance.state();
    assert_eq!(state.collapsed, Some(false));
    assert_eq!(state.processed, 3);
    assert_eq!(state.phase, Phase::Idle);
    assert_eq!(state.id.as_deref(), Some("x"));
    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_repeated_collapse_keeps_container_collapsed() {
    let (renderer, cancel) = live_renderer();
    let mut instance = wrap(paragraph).instance(Arc::clone(&renderer), Some(true));

    for _ in 0..2 {
        let outcome = instance.process(PropertyUpdate::new("x", true)).await.unwrap();
        assert!(matches!(outcome, Outcome::Collapsed));
        assert!(renderer.query("x").unwrap().has_class("collapsed"));
    }
    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_commit_timeout_skips_transition() {
    let (renderer, cancel) = live_renderer();
    renderer.set_commits_paused(true);
    let mut instance = wrap(paragraph).instance(Arc::clone(&renderer), None);

    let start = Instant::now();
    let outcome = instance.process(PropertyUpdate::new("x", true)).await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(1000), "{elapsed:?}");
    assert!(elapsed <= Duration::from_millis(1020), "{elapsed:?}");
    match outcome {
        Outcome::Skipped(CollapseError::Timeout { id, timeout }) => {
            assert_eq!(id, "x");
            assert_eq!(timeout, Duration::from_millis(1000));
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(renderer.query("x").is_none());
    assert_eq!(instance.state().collapsed, Some(true));
    assert_eq!(instance.state().processed, 1);

    // A later update is processed normally once commits resume.
    renderer.set_commits_paused(false);
    let outcome = instance.process(PropertyUpdate::new("x", false)).await.unwrap();
    assert!(matches!(outcome, Outcome::Expanded));
    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_timeout_never_touches_element() {
    let target = Arc::new(ScriptedTarget::new(30, 0));
    let mut instance = wrap(paragraph)
        .with_config(WrapperConfig::default().commit_timeout(Duration::from_millis(200)))
        .instance(Arc::clone(&target), None);

    let outcome = instance.process(PropertyUpdate::new("x", true)).await.unwrap();

    assert!(matches!(
        outcome,
        Outcome::Skipped(CollapseError::Timeout { .. })
    ));
    assert!(target.element.ops().is_empty());
    assert_eq!(target.submitted.lock().unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_node_gone_after_commit_is_skipped() {
    let target = Arc::new(ScriptedTarget::new(30, 1));
    let mut instance = wrap(paragraph).instance(Arc::clone(&target), None);

    let outcome = instance.process(PropertyUpdate::new("x", true)).await.unwrap();

    match outcome {
        Outcome::Skipped(ref e @ CollapseError::MissingElement { ref id }) => {
            assert_eq!(id, "x");
            assert!(e.is_recoverable());
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert!(target.element.ops().is_empty());
    assert_eq!(instance.state().collapsed, Some(true));
}

#[tokio::test(start_paused = true)]
async fn test_scripted_target_sees_transition_ops() {
    let target = Arc::new(ScriptedTarget::new(30, usize::MAX));
    let mut instance = wrap(paragraph).instance(Arc::clone(&target), None);

    instance.process(PropertyUpdate::new("x", false)).await.unwrap();
    assert_eq!(
        target.element.ops(),
        vec![Op::ReadExtent, Op::SetHeight(Height::Px(30))]
    );

    instance.process(PropertyUpdate::new("x", true)).await.unwrap();
    assert_eq!(target.element.ops().last(), Some(&Op::SetHeight(Height::Px(0))));
    assert_eq!(
        target
            .element
            .ops()
            .iter()
            .filter(|op| **op == Op::Frame)
            .count(),
        2
    );

    let submitted = target.submitted.lock().unwrap();
    assert_eq!(submitted.len(), 2);
    assert!(submitted.iter().all(|d| !d.has_class("collapsed")));
}

#[tokio::test(start_paused = true)]
async fn test_missing_id_is_rejected() {
    let target = Arc::new(ScriptedTarget::new(30, usize::MAX));
    let mut instance = wrap(paragraph).instance(Arc::clone(&target), Some(false));

    let err = instance
        .process(PropertyUpdate::without_id(true))
        .await
        .unwrap_err();

    assert!(matches!(err, CollapseError::InvalidUpdate { .. }));
    assert!(!err.is_recoverable());
    assert!(target.submitted.lock().unwrap().is_empty());
    assert_eq!(instance.state().collapsed, Some(false));
    assert_eq!(instance.state().processed, 0);
}

#[tokio::test(start_paused = true)]
async fn test_root_id_is_rejected() {
    let (renderer, cancel) = live_renderer();
    renderer.submit(Element::text("Title").id("header"));
    renderer.next_frame().await;
    let mut instance = wrap(paragraph).instance(Arc::clone(&renderer), None);

    let err = instance
        .process(PropertyUpdate::new("body", false))
        .await
        .unwrap_err();

    assert!(matches!(err, CollapseError::InvalidUpdate { .. }));
    renderer.next_frame().await;
    assert!(renderer.query("header").is_some());
    assert_eq!(renderer.render_lines(), vec!["Title"]);
    assert_eq!(instance.state().processed, 0);
    cancel.cancel();
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_collapse_frames() {
    let target = Arc::new(ScriptedTarget::new(30, usize::MAX).with_frozen_frames());
    let cancel = CancellationToken::new();
    let mut instance = wrap(paragraph)
        .instance(Arc::clone(&target), Some(false))
        .with_cancellation(cancel.clone());

    let mut state = instance.subscribe();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        state
            .wait_for(|s| s.phase == Phase::Transitioning)
            .await
            .unwrap();
        trigger.cancel();
    });

    let outcome = instance.process(PropertyUpdate::new("x", true)).await.unwrap();

    assert!(matches!(outcome, Outcome::Cancelled));
    // The suspended transition was put back on the way out.
    assert_eq!(
        target.element.ops(),
        vec![
            Op::ReadExtent,
            Op::ReadTransition,
            Op::SetTransition(TransitionTiming::Disabled),
            Op::SetTransition(TransitionTiming::Inherit),
        ]
    );
    let state = instance.state();
    assert_eq!(state.collapsed, Some(false));
    assert_eq!(state.processed, 0);
    assert_eq!(state.phase, Phase::Idle);
}

#[tokio::test(start_paused = true)]
async fn test_remembered_state_tracks_last_update() {
    let sequences: [&[bool]; 5] = [
        &[true],
        &[false, false],
        &[true, false, true, true],
        &[false, true, false],
        &[true, true, false, false, true],
    ];

    for sequence in sequences {
        let target = Arc::new(ScriptedTarget::new(20, usize::MAX));
        let mut instance = wrap(paragraph).instance(target, None);
        for &collapsed in sequence {
            instance
                .process(PropertyUpdate::new("x", collapsed))
                .await
                .unwrap();
        }
        let state = instance.state();
        assert_eq!(state.collapsed, sequence.last().copied(), "{sequence:?}");
        assert_eq!(state.processed, sequence.len() as u64);
    }
}

#[tokio::test(start_paused = true)]
async fn test_run_stops_at_invalid_update() {
    let target = Arc::new(ScriptedTarget::new(20, usize::MAX));
    let instance = wrap(paragraph).instance(target, None);
    let state = instance.subscribe();

    let updates = stream::iter(vec![
        PropertyUpdate::new("x", true),
        PropertyUpdate::without_id(false),
        PropertyUpdate::new("x", false),
    ]);
    let result = instance.run(updates).await;

    assert!(matches!(result, Err(CollapseError::InvalidUpdate { .. })));
    assert_eq!(state.borrow().processed, 1);
    assert_eq!(state.borrow().collapsed, Some(true));
}

#[tokio::test(start_paused = true)]
async fn test_cancel_during_commit_wait() {
    let (renderer, frames) = live_renderer();
    renderer.set_commits_paused(true);
    let cancel = CancellationToken::new();
    let mut instance = wrap(paragraph)
        .instance(Arc::clone(&renderer), None)
        .with_cancellation(cancel.clone());

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let start = Instant::now();
    let outcome = instance.process(PropertyUpdate::new("x", true)).await.unwrap();

    assert!(matches!(outcome, Outcome::Cancelled));
    assert_eq!(start.elapsed(), Duration::from_millis(50));
    assert_eq!(instance.state().processed, 0);
    assert_eq!(instance.state().collapsed, None);
    assert_eq!(instance.state().phase, Phase::Idle);
    frames.cancel();
}

#[test]
fn test_struct_components_render() {
    struct Banner;

    impl Component for Banner {
        fn render(&self, _props: &Props) -> Element {
            Element::text("banner")
        }
    }

    let element = wrap(Banner).describe("b", &Props::new(), false);
    assert_eq!(
        element.content.children()[0].content,
        Content::Text("banner".into())
    );
}
