//! Section-driven parser for translated SAS+ problems.

use sasgraph_core::problem::DEFAULT_VERSION;
use sasgraph_core::{
    Effect, Fact, MutexGroup, Operator, Problem, Result, SasError, State, Value, Variable,
};
use tracing::{debug, info};

use crate::cursor::LineCursor;

/// Pre-value meaning "any value" in an effect line.
pub const ANY_VALUE: i64 = -1;

/// Top-level section markers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Version,
    Metric,
    Variable,
    MutexGroup,
    State,
    Goal,
    Operator,
}

impl Section {
    fn from_marker(line: &str) -> Option<Self> {
        match line {
            "begin_version" => Some(Section::Version),
            "begin_metric" => Some(Section::Metric),
            "begin_variable" => Some(Section::Variable),
            "begin_mutex_group" => Some(Section::MutexGroup),
            "begin_state" => Some(Section::State),
            "begin_goal" => Some(Section::Goal),
            "begin_operator" => Some(Section::Operator),
            _ => None,
        }
    }
}

/// Parser for the line-oriented SAS+ format.
///
/// Sections may appear in any order; lines outside a known section are
/// skipped. The state section reads one value per variable declared before it.
#[derive(Debug, Default)]
pub struct SasParser {
    version: Option<u32>,
    metric: Option<bool>,
    variables: Vec<Variable>,
    mutex_groups: Vec<MutexGroup>,
    initial_state: Option<State>,
    goal: Vec<Fact>,
    operators: Vec<Operator>,
}

impl SasParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a whole problem.
    pub fn parse(content: &str) -> Result<Problem> {
        let mut parser = Self::new();
        let mut cursor = LineCursor::new(content);

        while let Some(line) = cursor.advance() {
            let Some(section) = Section::from_marker(line) else {
                continue;
            };
            debug!("Parsing {:?} section at line {}", section, cursor.line());
            match section {
                Section::Version => parser.parse_version(&mut cursor)?,
                Section::Metric => parser.parse_metric(&mut cursor)?,
                Section::Variable => parser.parse_variable(&mut cursor)?,
                Section::MutexGroup => parser.parse_mutex_group(&mut cursor)?,
                Section::State => parser.parse_state(&mut cursor)?,
                Section::Goal => parser.parse_goal(&mut cursor)?,
                Section::Operator => parser.parse_operator(&mut cursor)?,
            }
        }

        let problem = parser.finish()?;
        info!(
            "Parsed problem with {} variables and {} operators",
            problem.variables.len(),
            problem.operators.len()
        );
        Ok(problem)
    }

    fn parse_version(&mut self, cursor: &mut LineCursor<'_>) -> Result<()> {
        self.version = Some(cursor.next_number("version")?);
        cursor.expect("end_version", "version")
    }

    fn parse_metric(&mut self, cursor: &mut LineCursor<'_>) -> Result<()> {
        let flag: i64 = cursor.next_number("metric")?;
        self.metric = Some(flag != 0);
        cursor.expect("end_metric", "metric")
    }

    fn parse_variable(&mut self, cursor: &mut LineCursor<'_>) -> Result<()> {
        let name = cursor.next_line("variable")?.to_string();
        // Axiom layer, unused.
        cursor.next_line("variable")?;
        let domain_size: usize = cursor.next_number("variable")?;
        if domain_size == 0 {
            return Err(SasError::format(
                cursor.line(),
                format!("variable '{}' has an empty domain", name),
            ));
        }

        let mut value_labels = Vec::new();
        for _ in 0..domain_size {
            value_labels.push(cursor.next_line("variable")?.to_string());
        }
        cursor.expect("end_variable", "variable")?;

        self.variables.push(Variable {
            name,
            id: self.variables.len(),
            domain_size,
            value_labels,
        });
        Ok(())
    }

    fn parse_mutex_group(&mut self, cursor: &mut LineCursor<'_>) -> Result<()> {
        let count: usize = cursor.next_number("mutex group")?;
        let mut facts = Vec::new();
        for _ in 0..count {
            facts.push(cursor.next_fact("mutex group")?);
        }
        cursor.expect("end_mutex_group", "mutex group")?;
        self.mutex_groups.push(MutexGroup { facts });
        Ok(())
    }

    fn parse_state(&mut self, cursor: &mut LineCursor<'_>) -> Result<()> {
        let mut values = Vec::with_capacity(self.variables.len());
        for _ in 0..self.variables.len() {
            let raw: i64 = cursor.next_number("state")?;
            values.push(cursor.value(raw)?);
        }
        // Anything but the terminator here means a shifted state vector.
        cursor.expect("end_state", "state")?;
        self.initial_state = Some(State::from(values));
        Ok(())
    }

    fn parse_goal(&mut self, cursor: &mut LineCursor<'_>) -> Result<()> {
        let count: usize = cursor.next_number("goal")?;
        let mut goal = Vec::new();
        for _ in 0..count {
            goal.push(cursor.next_fact("goal")?);
        }
        cursor.expect("end_goal", "goal")?;
        self.goal = goal;
        Ok(())
    }

    fn parse_operator(&mut self, cursor: &mut LineCursor<'_>) -> Result<()> {
        let name = cursor.next_line("operator")?.to_string();
        let mut operator = Operator::new(name, 0);

        let prevail_count: usize = cursor.next_number("operator")?;
        for _ in 0..prevail_count {
            operator.prevail.push(cursor.next_fact("operator")?);
        }

        let effect_count: usize = cursor.next_number("operator")?;
        for _ in 0..effect_count {
            let (effect, precondition) = Self::parse_effect(cursor)?;
            if let Some(fact) = precondition {
                operator.prevail.push(fact);
            }
            operator.effects.push(effect);
        }

        operator.cost = cursor.next_number("operator")?;
        cursor.expect("end_operator", "operator")?;
        self.operators.push(operator);
        Ok(())
    }

    /// `guard_count [guard_var guard_value]* var pre_value post_value`
    ///
    /// Returns the effect and, unless the pre-value is [`ANY_VALUE`], the
    /// precondition it implies for the whole operator.
    fn parse_effect(cursor: &mut LineCursor<'_>) -> Result<(Effect, Option<Fact>)> {
        let numbers = cursor.next_numbers("operator")?;
        let Some((&guard_count, rest)) = numbers.split_first() else {
            return Err(SasError::format(cursor.line(), "empty effect line"));
        };
        let guard_count = cursor.index(guard_count)?;
        let expected = guard_count.saturating_mul(2).saturating_add(3);
        if rest.len() != expected {
            return Err(SasError::format(
                cursor.line(),
                format!(
                    "effect with {} guard conditions needs {} numbers after the count, found {}",
                    guard_count,
                    expected,
                    rest.len()
                ),
            ));
        }

        let (guard_numbers, triplet) = rest.split_at(2 * guard_count);
        let guard = guard_numbers
            .chunks_exact(2)
            .map(|pair| cursor.fact(pair[0], pair[1]))
            .collect::<Result<Vec<_>>>()?;

        let var = cursor.index(triplet[0])?;
        let precondition = match triplet[1] {
            ANY_VALUE => None,
            pre_value => Some(Fact::new(var, cursor.value(pre_value)?)),
        };
        let new_value: Value = cursor.value(triplet[2])?;

        Ok((
            Effect {
                var,
                new_value,
                guard,
            },
            precondition,
        ))
    }

    fn finish(self) -> Result<Problem> {
        let initial_state = match self.initial_state {
            Some(state) => state,
            None if self.variables.is_empty() => State::from(Vec::new()),
            None => {
                return Err(SasError::format(
                    0,
                    "input declares variables but no initial state",
                ))
            }
        };

        let problem = Problem {
            version: self.version.unwrap_or(DEFAULT_VERSION),
            metric: self.metric.unwrap_or(true),
            variables: self.variables,
            mutex_groups: self.mutex_groups,
            initial_state,
            goal: self.goal,
            operators: self.operators,
        };
        problem.validate()?;
        problem.warn_inconsistent_operators();
        Ok(problem)
    }
}

/// Parse a problem from its text.
pub fn parse(content: &str) -> Result<Problem> {
    SasParser::parse(content)
}
