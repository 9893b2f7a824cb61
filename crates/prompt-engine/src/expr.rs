use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::answers::AnswerStore;
use crate::hooks::truthy;

/// Lightweight expression AST used for declarative `when` conditions.
///
/// Paths are dotted answer paths, the same form as prompt ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Expr {
    LiteralBool { value: bool },
    Eq { path: String, value: Value },
    Ne { path: String, value: Value },
    In { path: String, values: Vec<Value> },
    Truthy { path: String },
    And { expressions: Vec<Expr> },
    Or { expressions: Vec<Expr> },
    Not { expression: Box<Expr> },
}

impl Expr {
    /// Evaluates the expression against the live answers. Missing answers
    /// are falsy: `eq` and `in` fail, `ne` succeeds.
    pub fn evaluate(&self, answers: &AnswerStore) -> bool {
        match self {
            Expr::LiteralBool { value } => *value,
            Expr::Eq { path, value } => answers.get(path).as_ref() == Some(value),
            Expr::Ne { path, value } => answers.get(path).as_ref() != Some(value),
            Expr::In { path, values } => answers
                .get(path)
                .is_some_and(|answer| values.contains(&answer)),
            Expr::Truthy { path } => answers.get(path).as_ref().is_some_and(truthy),
            Expr::And { expressions } => expressions.iter().all(|expr| expr.evaluate(answers)),
            Expr::Or { expressions } => expressions.iter().any(|expr| expr.evaluate(answers)),
            Expr::Not { expression } => !expression.evaluate(answers),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn answers() -> AnswerStore {
        AnswerStore::from_value(json!({
            "preset": "manual",
            "features": { "router": true, "lint": "" }
        }))
    }

    #[test]
    fn parses_tagged_json() {
        let expr: Expr = serde_json::from_value(json!({
            "op": "and",
            "expressions": [
                { "op": "eq", "path": "preset", "value": "manual" },
                { "op": "truthy", "path": "features.router" }
            ]
        }))
        .expect("expr");
        assert!(expr.evaluate(&answers()));
    }

    #[test]
    fn missing_answers_are_falsy() {
        let answers = answers();
        let eq = Expr::Eq {
            path: "missing".into(),
            value: json!(null),
        };
        assert!(!eq.evaluate(&answers));
        let truthy = Expr::Truthy {
            path: "features.lint".into(),
        };
        assert!(!truthy.evaluate(&answers));
        let not = Expr::Not {
            expression: Box::new(truthy),
        };
        assert!(not.evaluate(&answers));
    }

    #[test]
    fn in_matches_any_listed_value() {
        let expr = Expr::In {
            path: "preset".into(),
            values: vec![json!("default"), json!("manual")],
        };
        assert!(expr.evaluate(&answers()));
    }
}
