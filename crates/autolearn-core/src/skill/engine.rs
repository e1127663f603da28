//! `SkillEngine`: the two-operation surface the rest of the system uses.
//!
//! Wraps a shared [`SkillRegistry`] and [`SkillRunner`], applies the
//! configured default depth ceiling to every top-level run, and publishes
//! [`SkillEvent`]s for registry changes and top-level runs.

use std::sync::Arc;
use std::time::Instant;

use autolearn_types::config::EngineConfig;
use autolearn_types::event::SkillEvent;
use autolearn_types::skill::SkillMeta;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::body::{Kwargs, SkillBody, SkillOutput};
use super::builtin;
use super::context::ExecutionContext;
use super::dispatcher::SkillDispatcher;
use super::error::SkillError;
use super::registry::SkillRegistry;
use super::runner::SkillRunner;
use crate::event::EventBus;

/// Registers skills and runs them with composition safety.
///
/// Cloning yields another handle to the same registry and event bus.
#[derive(Debug, Clone)]
pub struct SkillEngine {
    runner: SkillRunner,
    events: EventBus,
    config: EngineConfig,
}

impl SkillEngine {
    /// Create an empty engine.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            runner: SkillRunner::new(Arc::new(SkillRegistry::new())),
            events: EventBus::new(config.event_capacity.max(1)),
            config,
        }
    }

    /// Create an engine with the built-in skills (`echo`) registered.
    pub fn with_default_skills(config: EngineConfig) -> Result<Self, SkillError> {
        let engine = Self::new(config);
        builtin::register_builtins(&engine)?;
        Ok(engine)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn registry(&self) -> &Arc<SkillRegistry> {
        self.runner.registry()
    }

    /// Register a closure body. Replaces any skill with the same name.
    pub fn register<F>(&self, meta: SkillMeta, body: F) -> Result<(), SkillError>
    where
        F: Fn(&Kwargs, &SkillDispatcher) -> anyhow::Result<SkillOutput> + Send + Sync + 'static,
    {
        self.register_body(meta, Arc::new(body))
    }

    /// Register a shared body implementation.
    pub fn register_body(&self, meta: SkillMeta, body: Arc<dyn SkillBody>) -> Result<(), SkillError> {
        let name = meta.name.clone();
        let replaced = self.registry().register(meta, body)?;
        self.events.publish(SkillEvent::Registered { name, replaced });
        Ok(())
    }

    /// Remove a skill by name. Returns its metadata if it existed.
    pub fn remove(&self, name: &str) -> Option<SkillMeta> {
        let removed = self.registry().remove(name);
        if removed.is_some() {
            self.events.publish(SkillEvent::Removed {
                name: name.to_string(),
            });
        }
        removed
    }

    /// Metadata for all registered skills in registration order.
    pub fn list(&self) -> Vec<SkillMeta> {
        self.registry().list()
    }

    /// Metadata for one skill.
    pub fn meta(&self, name: &str) -> Result<SkillMeta, SkillError> {
        self.registry().get(name).map(|skill| skill.meta().clone())
    }

    /// Run `name` as a top-level invocation using the configured depth ceiling.
    pub fn run(&self, name: &str, kwargs: Kwargs) -> Result<SkillOutput, SkillError> {
        self.run_with_max_depth(name, kwargs, self.config.max_call_depth)
    }

    /// Run `name` as a top-level invocation with a per-run depth ceiling.
    pub fn run_with_max_depth(
        &self,
        name: &str,
        kwargs: Kwargs,
        max_depth: usize,
    ) -> Result<SkillOutput, SkillError> {
        self.run_in_context(name, kwargs, &ExecutionContext::with_max_depth(max_depth))
    }

    /// Run `name` from the frame described by `context`.
    ///
    /// Each call gets its own run id; nothing about the call chain outlives
    /// the call.
    pub fn run_in_context(
        &self,
        name: &str,
        kwargs: Kwargs,
        context: &ExecutionContext,
    ) -> Result<SkillOutput, SkillError> {
        let run_id = Uuid::now_v7();
        let span = tracing::info_span!("skill_run", %run_id, skill = %name);
        let _enter = span.enter();

        self.events.publish(SkillEvent::ExecutionStarted {
            run_id,
            skill: name.to_string(),
        });
        let started = Instant::now();

        let result = self.runner.run_in_context(name, &kwargs, context);
        let duration_ms = started.elapsed().as_millis() as u64;

        match &result {
            Ok(_) => {
                tracing::info!(duration_ms, "skill run completed");
                self.events.publish(SkillEvent::ExecutionCompleted {
                    run_id,
                    skill: name.to_string(),
                    duration_ms,
                });
            }
            Err(err) => {
                tracing::warn!(kind = %err.kind(), error = %err, "skill run failed");
                self.events.publish(SkillEvent::ExecutionFailed {
                    run_id,
                    skill: name.to_string(),
                    error: err.to_string(),
                    call_chain: err.failure_chain().to_vec(),
                });
            }
        }

        result
    }

    /// Subscribe to engine events.
    pub fn subscribe(&self) -> broadcast::Receiver<SkillEvent> {
        self.events.subscribe()
    }
}

impl Default for SkillEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skill::args::{KwargsExt, kwargs};
    use crate::skill::error::ErrorKind;
    use autolearn_types::skill::ParamType;
    use serde_json::json;

    fn binary(name: &str) -> SkillMeta {
        SkillMeta::new(name, format!("{name} two numbers"))
            .param("a", ParamType::Number)
            .param("b", ParamType::Number)
    }

    fn arithmetic_engine() -> SkillEngine {
        let engine = SkillEngine::default();
        engine
            .register(binary("add"), |args, _| {
                Ok(kwargs([("result", json!(args.require_f64("a")? + args.require_f64("b")?))]))
            })
            .unwrap();
        engine
            .register(binary("multiply"), |args, _| {
                Ok(kwargs([("result", json!(args.require_f64("a")? * args.require_f64("b")?))]))
            })
            .unwrap();
        engine
    }

    /// Registers `prefix_0 -> prefix_1 -> ... -> prefix_{len-1}`; the last
    /// skill returns its input `x`, every other one adds 1 to its child's result.
    fn register_linear_chain(engine: &SkillEngine, prefix: &str, len: usize) {
        for i in 0..len {
            let next = (i + 1 < len).then(|| format!("{prefix}_{}", i + 1));
            engine
                .register(
                    SkillMeta::new(format!("{prefix}_{i}"), "").param("x", ParamType::Number),
                    move |args, skills| {
                        let x = args.require_f64("x")?;
                        match &next {
                            Some(next) => {
                                let out = skills.dispatch(next, kwargs([("x", json!(x + 1.0))]))?;
                                let inner = out.require_f64("result")?;
                                Ok(kwargs([("result", json!(inner + 1.0))]))
                            }
                            None => Ok(kwargs([("result", json!(x))])),
                        }
                    },
                )
                .unwrap();
        }
    }

    #[test]
    fn formula_composes_add_and_multiply() {
        let engine = arithmetic_engine();
        engine
            .register(
                SkillMeta::new("formula", "(x + y) * z")
                    .param("x", ParamType::Number)
                    .param("y", ParamType::Number)
                    .param("z", ParamType::Number),
                |args, skills| {
                    let s = skills.dispatch(
                        "add",
                        kwargs([("a", args.require("x")?.clone()), ("b", args.require("y")?.clone())]),
                    )?;
                    let p = skills.dispatch(
                        "multiply",
                        kwargs([("a", s["result"].clone()), ("b", args.require("z")?.clone())]),
                    )?;
                    Ok(kwargs([("result", p["result"].clone())]))
                },
            )
            .unwrap();

        let out = engine
            .run("formula", kwargs([("x", json!(3)), ("y", json!(4)), ("z", json!(5))]))
            .unwrap();
        assert_eq!(out["result"], json!(35.0));
    }

    #[test]
    fn nested_result_is_returned_unchanged() {
        let engine = SkillEngine::default();
        engine
            .register(SkillMeta::new("profile", ""), |_, _| {
                Ok(kwargs([
                    ("name", json!("luna")),
                    ("tags", json!(["a", "b"])),
                    ("nested", json!({"depth": 2})),
                ]))
            })
            .unwrap();
        engine
            .register(SkillMeta::new("passthrough", ""), |_, skills| {
                skills.dispatch("profile", Kwargs::new()).map_err(Into::into)
            })
            .unwrap();

        let direct = engine.run("profile", Kwargs::new()).unwrap();
        let composed = engine.run("passthrough", Kwargs::new()).unwrap();
        assert_eq!(direct, composed);
    }

    #[test]
    fn sibling_calls_to_same_skill_are_not_cycles() {
        let engine = arithmetic_engine();
        engine
            .register(SkillMeta::new("square", "").param("x", ParamType::Number), |args, skills| {
                let x = args.require("x")?.clone();
                skills.dispatch("multiply", kwargs([("a", x.clone()), ("b", x)])).map_err(Into::into)
            })
            .unwrap();
        engine
            .register(SkillMeta::new("sum_of_squares", ""), |args, skills| {
                let a = skills.dispatch("square", kwargs([("x", args.require("a")?.clone())]))?;
                let b = skills.dispatch("square", kwargs([("x", args.require("b")?.clone())]))?;
                skills
                    .dispatch("add", kwargs([("a", a["result"].clone()), ("b", b["result"].clone())]))
                    .map_err(Into::into)
            })
            .unwrap();

        let out = engine
            .run("sum_of_squares", kwargs([("a", json!(3)), ("b", json!(4))]))
            .unwrap();
        assert_eq!(out["result"], json!(25.0));
    }

    #[test]
    fn mutual_recursion_is_rejected_with_full_chain() {
        let engine = SkillEngine::default();
        engine
            .register(SkillMeta::new("a_skill", ""), |_, skills| {
                skills.dispatch("b_skill", Kwargs::new()).map_err(Into::into)
            })
            .unwrap();
        engine
            .register(SkillMeta::new("b_skill", ""), |_, skills| {
                skills.dispatch("a_skill", Kwargs::new()).map_err(Into::into)
            })
            .unwrap();

        let err = engine.run("a_skill", Kwargs::new()).unwrap_err();
        assert!(matches!(err, SkillError::Runtime { ref skill, .. } if skill == "a_skill"));
        assert_eq!(err.kind(), ErrorKind::CircularDependency);
        assert_eq!(err.failure_chain(), ["a_skill", "b_skill", "a_skill"]);
        assert!(err.to_string().contains("circular dependency detected"));

        let err = engine.run("b_skill", Kwargs::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CircularDependency);
        assert_eq!(err.failure_chain(), ["b_skill", "a_skill", "b_skill"]);
    }

    #[test]
    fn direct_self_recursion_is_rejected() {
        let engine = SkillEngine::default();
        engine
            .register(SkillMeta::new("recursive_skill", ""), |args, skills| {
                let n = args.require_f64("n")?;
                if n <= 0.0 {
                    return Ok(kwargs([("result", json!(0))]));
                }
                skills
                    .dispatch("recursive_skill", kwargs([("n", json!(n - 1.0))]))
                    .map_err(Into::into)
            })
            .unwrap();

        let err = engine
            .run("recursive_skill", kwargs([("n", json!(5))]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CircularDependency);
        assert_eq!(err.failure_chain(), ["recursive_skill", "recursive_skill"]);
    }

    #[test]
    fn chain_of_exactly_max_depth_succeeds() {
        let engine = SkillEngine::default();
        register_linear_chain(&engine, "step", 5);

        let out = engine.run("step_0", kwargs([("x", json!(10))])).unwrap();
        // x grows by 1 on each of the 4 descents, then 1 is added on each of the 4 returns.
        assert_eq!(out["result"], json!(18.0));
    }

    #[test]
    fn six_level_chain_fails_at_default_depth_and_passes_with_six() {
        let engine = SkillEngine::default();
        register_linear_chain(&engine, "skill", 6);

        let err = engine.run("skill_0", kwargs([("x", json!(1))])).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MaxDepthExceeded);
        assert_eq!(
            err.failure_chain(),
            ["skill_0", "skill_1", "skill_2", "skill_3", "skill_4", "skill_5"]
        );
        match err.innermost() {
            SkillError::MaxDepthExceeded { max_depth, .. } => assert_eq!(*max_depth, 5),
            other => panic!("expected MaxDepthExceeded, got {other:?}"),
        }

        let out = engine
            .run_with_max_depth("skill_0", kwargs([("x", json!(1))]), 6)
            .unwrap();
        assert_eq!(out["result"], json!(11.0));
    }

    #[test]
    fn configured_default_depth_applies_to_run() {
        let engine = SkillEngine::new(EngineConfig {
            max_call_depth: 6,
            ..EngineConfig::default()
        });
        register_linear_chain(&engine, "skill", 6);
        assert!(engine.run("skill_0", kwargs([("x", json!(1))])).is_ok());
    }

    #[test]
    fn nested_not_found_is_reported() {
        let engine = SkillEngine::default();
        engine
            .register(SkillMeta::new("caller_skill", ""), |_, skills| {
                skills
                    .dispatch("nonexistent_skill", kwargs([("x", json!(42))]))
                    .map_err(Into::into)
            })
            .unwrap();

        let err = engine.run("caller_skill", Kwargs::new()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert!(err.to_string().contains("nonexistent_skill"));
    }

    #[test]
    fn nested_body_fault_propagates_and_success_path_still_works() {
        let engine = SkillEngine::default();
        engine
            .register(SkillMeta::new("failing_skill", ""), |args, _| {
                if args.require_bool("should_fail")? {
                    anyhow::bail!("This skill failed!");
                }
                Ok(kwargs([("result", json!("success"))]))
            })
            .unwrap();
        engine
            .register(SkillMeta::new("caller_skill", ""), |args, skills| {
                let out = skills.dispatch(
                    "failing_skill",
                    kwargs([("should_fail", args.require("trigger_error")?.clone())]),
                )?;
                Ok(kwargs([("result", out["result"].clone())]))
            })
            .unwrap();

        let err = engine
            .run("caller_skill", kwargs([("trigger_error", json!(true))]))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::BodyFault);
        assert_eq!(err.root_message(), "This skill failed!");
        assert_eq!(err.failure_chain(), ["caller_skill", "failing_skill"]);

        let out = engine
            .run("caller_skill", kwargs([("trigger_error", json!(false))]))
            .unwrap();
        assert_eq!(out["result"], "success");
    }

    #[test]
    fn concurrent_runs_do_not_share_chains() {
        let engine = SkillEngine::default();
        engine
            .register(SkillMeta::new("B", ""), |_, skills| {
                std::thread::yield_now();
                Ok(kwargs([("chain", json!(skills.context().call_chain()))]))
            })
            .unwrap();
        for caller in ["A", "C"] {
            engine
                .register(SkillMeta::new(caller, ""), |_, skills| {
                    skills.dispatch("B", Kwargs::new()).map_err(Into::into)
                })
                .unwrap();
        }

        std::thread::scope(|scope| {
            let handles: Vec<_> = ["A", "C"]
                .into_iter()
                .flat_map(|caller| std::iter::repeat_n(caller, 50))
                .map(|caller| {
                    let engine = engine.clone();
                    scope.spawn(move || {
                        let out = engine.run(caller, Kwargs::new()).unwrap();
                        assert_eq!(out["chain"], json!([caller, "B"]));
                    })
                })
                .collect();
            for handle in handles {
                handle.join().unwrap();
            }
        });
    }

    #[test]
    fn remove_makes_skill_unavailable() {
        let engine = arithmetic_engine();
        assert!(engine.remove("add").is_some());
        assert!(matches!(
            engine.run("add", Kwargs::new()),
            Err(SkillError::NotFound(_))
        ));
        assert!(engine.remove("add").is_none());
        assert_eq!(engine.list().len(), 1);
    }

    #[test]
    fn meta_lookup() {
        let engine = arithmetic_engine();
        assert_eq!(engine.meta("add").unwrap().signature(), "add(a: number, b: number)");
        assert!(matches!(engine.meta("nope"), Err(SkillError::NotFound(_))));
    }

    #[tokio::test]
    async fn publishes_registry_and_run_events() {
        let engine = SkillEngine::default();
        let mut rx = engine.subscribe();

        engine
            .register(SkillMeta::new("ok", ""), |_, _| Ok(Kwargs::new()))
            .unwrap();
        engine
            .register(SkillMeta::new("ok", ""), |_, _| Ok(Kwargs::new()))
            .unwrap();
        engine.run("ok", Kwargs::new()).unwrap();
        let _ = engine.run("missing", Kwargs::new());

        assert!(matches!(
            rx.recv().await.unwrap(),
            SkillEvent::Registered { replaced: false, .. }
        ));
        assert!(matches!(
            rx.recv().await.unwrap(),
            SkillEvent::Registered { replaced: true, .. }
        ));
        let started = rx.recv().await.unwrap();
        assert!(matches!(started, SkillEvent::ExecutionStarted { .. }));
        let completed = rx.recv().await.unwrap();
        assert!(matches!(completed, SkillEvent::ExecutionCompleted { .. }));
        assert_eq!(started.run_id(), completed.run_id());

        assert!(matches!(
            rx.recv().await.unwrap(),
            SkillEvent::ExecutionStarted { .. }
        ));
        match rx.recv().await.unwrap() {
            SkillEvent::ExecutionFailed { skill, error, .. } => {
                assert_eq!(skill, "missing");
                assert!(error.contains("not found"));
            }
            other => panic!("expected ExecutionFailed, got {other:?}"),
        }
    }

    #[test]
    fn runs_without_subscribers() {
        let engine = arithmetic_engine();
        let out = engine
            .run("add", kwargs([("a", json!(1)), ("b", json!(2))]))
            .unwrap();
        assert_eq!(out["result"], json!(3.0));
    }
}
