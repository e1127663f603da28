//! Demonstration skills that exercise composition.
//!
//! `calculator`, `add`, `multiply` are leaves; `square`, `formula`,
//! `compound_formula` and `sum_of_squares` are composed from them through
//! their dispatcher.

use autolearn_core::skill::{Kwargs, KwargsExt, SkillDispatcher, SkillEngine, SkillError, SkillOutput, kwargs};
use autolearn_types::skill::{ParamType, SkillMeta};
use serde_json::json;

/// Register every demo skill on `engine`.
pub fn register_demo_skills(engine: &SkillEngine) -> Result<(), SkillError> {
    engine.register(
        SkillMeta::new("calculator", "Add or multiply two numbers")
            .param("operation", ParamType::String)
            .param("a", ParamType::Number)
            .param("b", ParamType::Number),
        calculator,
    )?;
    engine.register(binary("add", "Add two numbers"), |args, _| {
        Ok(result(args.require_f64("a")? + args.require_f64("b")?))
    })?;
    engine.register(binary("multiply", "Multiply two numbers"), |args, _| {
        Ok(result(args.require_f64("a")? * args.require_f64("b")?))
    })?;
    engine.register(
        SkillMeta::new("square", "Square a number using multiply").param("x", ParamType::Number),
        |args, skills| {
            let x = args.require_f64("x")?;
            Ok(skills.dispatch("multiply", kwargs([("a", json!(x)), ("b", json!(x))]))?)
        },
    )?;
    engine.register(
        SkillMeta::new("formula", "Compute (x + y) * z using add and multiply")
            .param("x", ParamType::Number)
            .param("y", ParamType::Number)
            .param("z", ParamType::Number),
        formula,
    )?;
    engine.register(
        SkillMeta::new("compound_formula", "Compute (x * 2) + (y * 3) + z using calculator")
            .param("x", ParamType::Number)
            .param("y", ParamType::Number)
            .param("z", ParamType::Number),
        compound_formula,
    )?;
    engine.register(
        SkillMeta::new("sum_of_squares", "Compute a^2 + b^2 using square and add")
            .param("a", ParamType::Number)
            .param("b", ParamType::Number),
        |args, skills| {
            let a = number(&skills.dispatch("square", kwargs([("x", json!(args.require_f64("a")?))]))?)?;
            let b = number(&skills.dispatch("square", kwargs([("x", json!(args.require_f64("b")?))]))?)?;
            Ok(skills.dispatch("add", kwargs([("a", json!(a)), ("b", json!(b))]))?)
        },
    )?;
    Ok(())
}

fn binary(name: &str, description: &str) -> SkillMeta {
    SkillMeta::new(name, description)
        .param("a", ParamType::Number)
        .param("b", ParamType::Number)
}

fn result(value: f64) -> SkillOutput {
    kwargs([("result", json!(value))])
}

fn number(output: &SkillOutput) -> anyhow::Result<f64> {
    output.require_f64("result")
}

fn calculator(args: &Kwargs, _: &SkillDispatcher) -> anyhow::Result<SkillOutput> {
    let a = args.require_f64("a")?;
    let b = args.require_f64("b")?;
    match args.require_str("operation")? {
        "add" => Ok(kwargs([("result", json!(a + b)), ("operation", json!("addition"))])),
        "multiply" => Ok(kwargs([
            ("result", json!(a * b)),
            ("operation", json!("multiplication")),
        ])),
        other => anyhow::bail!("unknown operation '{other}'"),
    }
}

fn formula(args: &Kwargs, skills: &SkillDispatcher) -> anyhow::Result<SkillOutput> {
    let sum = skills.dispatch(
        "add",
        kwargs([("a", json!(args.require_f64("x")?)), ("b", json!(args.require_f64("y")?))]),
    )?;
    let product = skills.dispatch(
        "multiply",
        kwargs([("a", json!(number(&sum)?)), ("b", json!(args.require_f64("z")?))]),
    )?;
    Ok(result(number(&product)?))
}

fn compound_formula(args: &Kwargs, skills: &SkillDispatcher) -> anyhow::Result<SkillOutput> {
    let calc = |operation: &str, a: f64, b: f64| -> anyhow::Result<f64> {
        let out = skills.dispatch(
            "calculator",
            kwargs([("operation", json!(operation)), ("a", json!(a)), ("b", json!(b))]),
        )?;
        number(&out)
    };

    let x = args.require_f64("x")?;
    let y = args.require_f64("y")?;
    let z = args.require_f64("z")?;

    let doubled = calc("multiply", x, 2.0)?;
    let tripled = calc("multiply", y, 3.0)?;
    let partial = calc("add", doubled, tripled)?;
    let total = calc("add", partial, z)?;

    Ok(kwargs([
        ("result", json!(total)),
        ("formula", json!("(x * 2) + (y * 3) + z")),
        ("steps", json!(format!("{doubled} + {tripled} + {z} = {total}"))),
    ]))
}
