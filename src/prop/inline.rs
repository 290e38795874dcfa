use crate::{
    config::Config,
    error::{Error, Result},
    prop::{InferenceRule, Line, Proof},
};
use tracing::{debug, trace};

/// Maps line indices of a source proof to line indices of the proof being
/// built. Entries are appended in source order; justifications only point
/// backwards, so they always resolve by the time their line is emitted.
#[derive(Default, Debug)]
pub(crate) struct Renumbering {
    new_index: Vec<usize>,
}

impl Renumbering {
    /// The next source line is not copied: it resolves to `target`, a line
    /// already present in the output.
    pub(crate) fn alias(&mut self, target: usize) {
        self.new_index.push(target);
    }
    pub(crate) fn translate(&self, old: usize) -> Result<usize> {
        self.new_index
            .get(old)
            .copied()
            .ok_or(Error::LineOutOfRange { line: old, len: self.new_index.len() })
    }
    /// Appends the next source line to `out` with its justifications rewritten.
    pub(crate) fn emit(&mut self, out: &mut Vec<Line>, line: &Line) -> Result<()> {
        let line = match line {
            Line::Assumption(_) => line.clone(),
            Line::Derivation { formula, rule, assumptions } => Line::Derivation {
                formula: formula.clone(),
                rule: rule.clone(),
                assumptions: assumptions.iter().map(|&j| self.translate(j)).collect::<Result<_>>()?,
            },
        };
        self.alias(out.len());
        out.push(line);
        Ok(())
    }
}

pub fn prove_specialization(proof: &Proof, specialization: &InferenceRule) -> Result<Proof> {
    prove_specialization_with(proof, specialization, &Config::DEFAULT)
}

/// Rewrites a proof of `proof.statement` into a proof of `specialization` by
/// specializing every line. Rules and justifications are kept verbatim.
pub fn prove_specialization_with(
    proof: &Proof,
    specialization: &InferenceRule,
    config: &Config,
) -> Result<Proof> {
    if config.verify_inputs {
        proof.ensure_valid()?;
    }
    let map = proof
        .statement
        .specialization_map(specialization)
        .ok_or_else(|| Error::not_a_specialization(&proof.statement, specialization))?;
    let lines = proof.lines.iter().map(|line| line.with_formula(line.formula().substitute_variables(&map)));
    Ok(Proof {
        statement: specialization.clone(),
        rules: proof.rules.clone(),
        lines: lines.collect(),
    })
}

pub fn inline_proof_once(main: &Proof, line: usize, lemma: &Proof) -> Result<Proof> {
    inline_proof_once_with(main, line, lemma, &Config::DEFAULT)
}

/// Replaces the single usage of the lemma rule at `line` of `main` with the
/// lemma's proof, specialized to that usage. Allowed rules become the union
/// of both proofs' rules.
pub fn inline_proof_once_with(
    main: &Proof,
    line: usize,
    lemma: &Proof,
    config: &Config,
) -> Result<Proof> {
    let rule = main
        .lines
        .get(line)
        .ok_or(Error::LineOutOfRange { line, len: main.lines.len() })?
        .rule()
        .ok_or(Error::NotADerivation { line })?;
    if *rule != lemma.statement {
        return Err(Error::LemmaMismatch {
            line,
            found: rule.to_string(),
            expected: lemma.statement.to_string(),
        });
    }
    if config.verify_inputs {
        main.ensure_valid()?;
        lemma.ensure_valid()?;
    }
    splice(main, line, lemma)
}

/// Requires `main.lines[line]` to apply the rule `lemma.statement`, and both
/// proofs to be valid.
fn splice(main: &Proof, line: usize, lemma: &Proof) -> Result<Proof> {
    let target = main.rule_for_line(line)?.ok_or(Error::NotADerivation { line })?;
    let partial = prove_specialization_with(lemma, &target, &Config::TRUSTING)?;
    let justifications = main.lines[line].justifications();

    let mut out = Vec::with_capacity(main.lines.len() + partial.lines.len());
    let mut main_table = Renumbering::default();
    for source in &main.lines[..line] {
        main_table.emit(&mut out, source)?;
    }

    let mut partial_table = Renumbering::default();
    for source in &partial.lines {
        match source {
            Line::Assumption(formula) => {
                // already derived in `main`, by the line justifying that slot
                let slot = target
                    .assumptions
                    .iter()
                    .position(|a| a == formula)
                    .ok_or_else(|| Error::invalid_proof(&partial.statement))?;
                partial_table.alias(main_table.translate(justifications[slot])?);
            }
            Line::Derivation { .. } => partial_table.emit(&mut out, source)?,
        }
    }
    let conclusion =
        partial.lines.len().checked_sub(1).ok_or_else(|| Error::invalid_proof(&lemma.statement))?;
    main_table.alias(partial_table.translate(conclusion)?);
    let appended = out.len() - line;

    for source in &main.lines[line + 1..] {
        main_table.emit(&mut out, source)?;
    }
    trace!(line, appended, lines = out.len(), "spliced lemma proof");

    Ok(Proof {
        statement: main.statement.clone(),
        rules: main.rules.union(&lemma.rules),
        lines: out,
    })
}

pub fn inline_proof(main: &Proof, lemma: &Proof) -> Result<Proof> {
    inline_proof_with(main, lemma, &Config::DEFAULT)
}

/// Inlines the lemma's proof at every usage of the lemma rule in `main`. The
/// result no longer allows the lemma rule.
pub fn inline_proof_with(main: &Proof, lemma: &Proof, config: &Config) -> Result<Proof> {
    if config.verify_inputs {
        main.ensure_valid()?;
        lemma.ensure_valid()?;
    }
    // each splice copies the lemma's lines; if those use the lemma, this never ends
    if lemma.lines_using(&lemma.statement).next().is_some() {
        return Err(Error::SelfReferentialLemma { lemma: lemma.statement.to_string() });
    }

    let mut proof = main.clone();
    let mut resume = 0;
    let mut steps = 0usize;
    // lines before the last splice point are untouched by it
    while let Some(offset) =
        proof.lines[resume..].iter().position(|line| line.rule() == Some(&lemma.statement))
    {
        let line = resume + offset;
        proof = splice(&proof, line, lemma)?;
        resume = line;
        steps += 1;
    }
    proof.rules.remove(&lemma.statement);
    debug!(steps, lines = proof.lines.len(), lemma = %lemma.statement, "inlined lemma");
    Ok(proof)
}
