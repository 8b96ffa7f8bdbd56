use serde::{Deserialize, Serialize};
use tracing::info;

use crate::engine::{
    calculate_risk_score, generate_explanation, validate_inputs, Assessment, DerivedFields,
    EvaluationError, OperatorRegistry, Result, RuleEngine,
};
use crate::model::{Applicant, Decision, LoanApplication, RiskLevel, Rule};

/// Outcome of scoring one application against one rule list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct EvaluationResult {
    pub risk_score: i32,
    pub risk_level: RiskLevel,
    pub decision: Decision,
    pub explanation: String,
    pub triggered_rules: Vec<Rule>,
    pub derived_fields: DerivedFields,
}

/// Entry point tying the engine together:
/// validate -> derive -> evaluate rules -> score -> tier/decision -> explain.
///
/// Holds no per-call state. One instance can serve concurrent evaluations on
/// any number of threads.
#[derive(Debug, Clone, Default)]
pub struct LoanEvaluator {
    engine: RuleEngine,
}

impl LoanEvaluator {
    pub fn new(registry: OperatorRegistry) -> Self {
        Self {
            engine: RuleEngine::new(registry),
        }
    }

    pub fn engine(&self) -> &RuleEngine {
        &self.engine
    }

    /// Validate the inputs and compute the derived fields.
    pub fn derived_fields(
        &self,
        applicant: &Applicant,
        application: &LoanApplication,
    ) -> Result<DerivedFields> {
        validate_inputs(applicant, application).map_err(EvaluationError::InvalidInput)?;
        DerivedFields::calculate(applicant, application)
    }

    /// Rules that fire for this pair, in priority order.
    pub fn triggered_rules<'r>(
        &self,
        applicant: &Applicant,
        application: &LoanApplication,
        rules: &'r [Rule],
    ) -> Result<Vec<&'r Rule>> {
        let derived = self.derived_fields(applicant, application)?;
        Ok(self
            .engine
            .evaluate_rules(application, applicant, &derived, rules))
    }

    /// Score without touching the application.
    pub fn assess(
        &self,
        applicant: &Applicant,
        application: &LoanApplication,
        rules: &[Rule],
    ) -> Result<EvaluationResult> {
        let derived = self.derived_fields(applicant, application)?;
        let triggered = self
            .engine
            .evaluate_rules(application, applicant, &derived, rules);

        let assessment = Assessment::from_score(calculate_risk_score(&triggered));
        let explanation =
            generate_explanation(applicant, application, &derived, &triggered, &assessment);

        info!(
            rules = rules.len(),
            triggered = triggered.len(),
            score = assessment.risk_score,
            level = %assessment.risk_level,
            decision = %assessment.decision,
            "evaluated loan application"
        );

        Ok(EvaluationResult {
            risk_score: assessment.risk_score,
            risk_level: assessment.risk_level,
            decision: assessment.decision,
            explanation,
            triggered_rules: triggered.into_iter().cloned().collect(),
            derived_fields: derived,
        })
    }

    /// Score and write the result fields onto `application`.
    ///
    /// Previous results are overwritten, so evaluating twice leaves the same
    /// values as evaluating once. On error the application is left untouched.
    pub fn evaluate(
        &self,
        application: &mut LoanApplication,
        applicant: &Applicant,
        rules: &[Rule],
    ) -> Result<EvaluationResult> {
        let result = self.assess(applicant, application, rules)?;

        application.risk_score = Some(result.risk_score);
        application.risk_level = Some(result.risk_level);
        application.decision = Some(result.decision);
        application.explanation = Some(result.explanation.clone());

        Ok(result)
    }
}
