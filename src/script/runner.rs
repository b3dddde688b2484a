//! Sandboxed script execution.
//!
//! [`ScriptEngine::execute`] parses and runs a script against a private
//! copy of the input array and returns an [`ExecutionResult`] in every
//! case. Scripts cannot touch the caller's array: reads go through
//! `arr[index]` and `len(arr)`, writes go through the `swap` and `set`
//! hooks, and the engine's working copy is only published as
//! `final_array` when the run succeeds.
//!
//! Execution is bounded three ways. A wall-clock deadline is checked at
//! every statement entry and at every loop back-edge, so `while (true) {}`
//! is stopped mid-flight. The event buffer is capped; once full, further
//! events are dropped and the result is flagged truncated but the run
//! still succeeds. The log channel has its own cap and drops silently.

use super::ast::{BinOp, Node, PostfixOp, Script, SourceLocation, UnOp};
use super::error::RuntimeFault;
use super::parser::{ParseError, Parser};
use super::Limits;
use crate::event::{CompareOutcome, Event, MarkKind};
use rustc_hash::FxHashMap;
use serde::Serialize;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// An event stamped with the elapsed time at which the script produced it.
#[derive(Debug, Clone, Serialize)]
pub struct TimedEvent {
    pub elapsed: Duration,
    pub event: Event,
}

/// A fault surfaced to callers: the rendered message plus the script line
/// it points at, when one is known.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScriptFault {
    pub message: String,
    pub line: Option<usize>,
}

/// Everything one script execution produced.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionResult {
    pub success: bool,
    pub events: Vec<TimedEvent>,
    pub logs: Vec<String>,
    pub error: Option<ScriptFault>,
    pub execution_time: Duration,
    /// Working copy after a successful run, the untouched input otherwise.
    pub final_array: Vec<i64>,
    /// True when the event cap dropped trailing events.
    pub truncated: bool,
}

/// Script executor. Stateless between runs apart from its limits.
pub struct ScriptEngine {
    limits: Limits,
}

impl Default for ScriptEngine {
    fn default() -> Self {
        ScriptEngine::new(Limits::default())
    }
}

impl ScriptEngine {
    pub fn new(limits: Limits) -> Self {
        Self { limits }
    }

    /// Parse and run a script against a copy of `input`.
    pub fn execute(&self, source: &str, input: &[i64]) -> ExecutionResult {
        let started = Instant::now();

        let script = match Parser::new(source).and_then(|mut p| p.parse_script()) {
            Ok(script) => script,
            Err(err) => return Self::parse_failure(err, input, started),
        };

        let mut interp = Interp::new(input.to_vec(), self.limits, started);
        let outcome = interp.run(&script);
        let execution_time = started.elapsed();
        let Interp {
            working,
            events,
            logs,
            truncated,
            ..
        } = interp;

        match outcome {
            Ok(()) => {
                debug!(
                    events = events.len(),
                    elapsed_ms = execution_time.as_millis() as u64,
                    truncated,
                    "script completed"
                );
                ExecutionResult {
                    success: true,
                    events,
                    logs,
                    error: None,
                    execution_time,
                    final_array: working,
                    truncated,
                }
            }
            Err(fault) => {
                warn!(error = %fault, "script faulted");
                ExecutionResult {
                    success: false,
                    events,
                    logs,
                    error: Some(ScriptFault {
                        message: fault.to_string(),
                        line: Some(fault.location().line),
                    }),
                    execution_time,
                    final_array: input.to_vec(),
                    truncated,
                }
            }
        }
    }

    fn parse_failure(err: ParseError, input: &[i64], started: Instant) -> ExecutionResult {
        warn!(error = %err, "script rejected");
        ExecutionResult {
            success: false,
            events: Vec::new(),
            logs: Vec::new(),
            error: Some(ScriptFault {
                message: err.to_string(),
                line: Some(err.location.line),
            }),
            execution_time: started.elapsed(),
            final_array: input.to_vec(),
            truncated: false,
        }
    }
}

/// Values a script expression can produce
#[derive(Debug, Clone, PartialEq)]
enum ScriptValue {
    Int(i64),
    Bool(bool),
    Str(String),
}

impl ScriptValue {
    fn type_name(&self) -> &'static str {
        match self {
            ScriptValue::Int(_) => "int",
            ScriptValue::Bool(_) => "bool",
            ScriptValue::Str(_) => "string",
        }
    }

    /// 0, false, and "" are falsy; everything else is truthy.
    fn truthy(&self) -> bool {
        match self {
            ScriptValue::Int(n) => *n != 0,
            ScriptValue::Bool(b) => *b,
            ScriptValue::Str(s) => !s.is_empty(),
        }
    }
}

impl fmt::Display for ScriptValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptValue::Int(n) => write!(f, "{}", n),
            ScriptValue::Bool(b) => write!(f, "{}", b),
            ScriptValue::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Tree-walking interpreter over one script run
struct Interp {
    working: Vec<i64>,
    scopes: Vec<FxHashMap<String, ScriptValue>>,
    events: Vec<TimedEvent>,
    logs: Vec<String>,
    truncated: bool,
    started: Instant,
    deadline: Instant,
    limits: Limits,
    should_break: bool,
    should_continue: bool,
    finished: bool,
}

impl Interp {
    fn new(working: Vec<i64>, limits: Limits, started: Instant) -> Self {
        Interp {
            working,
            scopes: vec![FxHashMap::default()],
            events: Vec::new(),
            logs: Vec::new(),
            truncated: false,
            started,
            deadline: started + limits.max_duration,
            limits,
            should_break: false,
            should_continue: false,
            finished: false,
        }
    }

    fn run(&mut self, script: &Script) -> Result<(), RuntimeFault> {
        for stmt in &script.statements {
            self.execute_statement(stmt)?;
            if self.finished {
                break;
            }
        }
        Ok(())
    }

    /// Execute a single statement
    fn execute_statement(&mut self, stmt: &Node) -> Result<(), RuntimeFault> {
        self.check_deadline(stmt.location())?;

        match stmt {
            Node::Let { name, init, .. } => {
                let value = self.evaluate_expr(init)?;
                self.declare(name.clone(), value);
                Ok(())
            }

            Node::Assignment {
                name,
                rhs,
                location,
            } => {
                let value = self.evaluate_expr(rhs)?;
                self.assign(name, value, *location)
            }

            Node::CompoundAssignment {
                name,
                op,
                rhs,
                location,
            } => {
                let current = self.lookup(name, *location)?;
                let rhs = self.evaluate_expr(rhs)?;
                let value = Self::apply_binary(*op, current, rhs, *location)?;
                self.assign(name, value, *location)
            }

            Node::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate_expr(condition)?.truthy() {
                    self.execute_block(then_branch)
                } else if let Some(else_branch) = else_branch {
                    self.execute_block(else_branch)
                } else {
                    Ok(())
                }
            }

            Node::While {
                condition,
                body,
                location,
            } => self.execute_while(condition, body, *location),

            Node::For {
                init,
                condition,
                step,
                body,
                location,
            } => self.execute_for(
                init.as_deref(),
                condition.as_deref(),
                step.as_deref(),
                body,
                *location,
            ),

            Node::Break { .. } => {
                self.should_break = true;
                Ok(())
            }

            Node::Continue { .. } => {
                self.should_continue = true;
                Ok(())
            }

            Node::Return { .. } => {
                self.finished = true;
                Ok(())
            }

            Node::ExpressionStatement { expr, .. } => {
                self.evaluate_expr(expr)?;
                Ok(())
            }

            // For-header clauses arrive here as bare expressions
            expr => {
                self.evaluate_expr(expr)?;
                Ok(())
            }
        }
    }

    /// Execute a block in a fresh scope
    fn execute_block(&mut self, body: &[Node]) -> Result<(), RuntimeFault> {
        self.scopes.push(FxHashMap::default());
        let result = self.execute_statements(body);
        self.scopes.pop();
        result
    }

    fn execute_statements(&mut self, body: &[Node]) -> Result<(), RuntimeFault> {
        for stmt in body {
            self.execute_statement(stmt)?;
            if self.finished || self.should_break || self.should_continue {
                break;
            }
        }
        Ok(())
    }

    fn execute_while(
        &mut self,
        condition: &Node,
        body: &[Node],
        location: SourceLocation,
    ) -> Result<(), RuntimeFault> {
        loop {
            // Deadline check on the back-edge, so empty bodies cannot spin
            self.check_deadline(location)?;

            if !self.evaluate_expr(condition)?.truthy() {
                break;
            }

            self.execute_block(body)?;
            if self.finished {
                return Ok(());
            }
            if self.should_break {
                self.should_break = false; // Reset the flag
                break;
            }
            if self.should_continue {
                self.should_continue = false; // Reset the flag
            }
        }

        Ok(())
    }

    fn execute_for(
        &mut self,
        init: Option<&Node>,
        condition: Option<&Node>,
        step: Option<&Node>,
        body: &[Node],
        location: SourceLocation,
    ) -> Result<(), RuntimeFault> {
        // The header's let binding lives in a scope wrapping the body
        self.scopes.push(FxHashMap::default());
        let result = self.run_for_loop(init, condition, step, body, location);
        self.scopes.pop();
        result
    }

    fn run_for_loop(
        &mut self,
        init: Option<&Node>,
        condition: Option<&Node>,
        step: Option<&Node>,
        body: &[Node],
        location: SourceLocation,
    ) -> Result<(), RuntimeFault> {
        if let Some(init) = init {
            self.execute_statement(init)?;
        }

        loop {
            self.check_deadline(location)?;

            if let Some(condition) = condition {
                if !self.evaluate_expr(condition)?.truthy() {
                    break;
                }
            }

            self.execute_block(body)?;
            if self.finished {
                return Ok(());
            }
            if self.should_break {
                self.should_break = false; // Reset the flag
                break;
            }
            if self.should_continue {
                self.should_continue = false; // Reset the flag
            }

            if let Some(step) = step {
                self.execute_statement(step)?;
            }
        }

        Ok(())
    }

    /// Evaluate an expression and return its value
    fn evaluate_expr(&mut self, expr: &Node) -> Result<ScriptValue, RuntimeFault> {
        match expr {
            Node::IntLiteral(value, _) => Ok(ScriptValue::Int(*value)),
            Node::StrLiteral(value, _) => Ok(ScriptValue::Str(value.clone())),
            Node::BoolLiteral(value, _) => Ok(ScriptValue::Bool(*value)),
            Node::Variable(name, location) => self.lookup(name, *location),

            Node::BinaryOp {
                op,
                left,
                right,
                location,
            } => match op {
                // Logical operators short-circuit
                BinOp::And => {
                    if !self.evaluate_expr(left)?.truthy() {
                        return Ok(ScriptValue::Bool(false));
                    }
                    let rhs = self.evaluate_expr(right)?;
                    Ok(ScriptValue::Bool(rhs.truthy()))
                }
                BinOp::Or => {
                    if self.evaluate_expr(left)?.truthy() {
                        return Ok(ScriptValue::Bool(true));
                    }
                    let rhs = self.evaluate_expr(right)?;
                    Ok(ScriptValue::Bool(rhs.truthy()))
                }
                _ => {
                    let lhs = self.evaluate_expr(left)?;
                    let rhs = self.evaluate_expr(right)?;
                    Self::apply_binary(*op, lhs, rhs, *location)
                }
            },

            Node::UnaryOp {
                op,
                operand,
                location,
            } => {
                let value = self.evaluate_expr(operand)?;
                match op {
                    UnOp::Neg => {
                        let n = Self::expect_int(&value, *location)?;
                        n.checked_neg().map(ScriptValue::Int).ok_or_else(|| {
                            RuntimeFault::IntegerOverflow {
                                operation: "negation".to_string(),
                                location: *location,
                            }
                        })
                    }
                    UnOp::Not => Ok(ScriptValue::Bool(!value.truthy())),
                }
            }

            Node::Postfix { name, op, location } => {
                let current = self.lookup(name, *location)?;
                let n = Self::expect_int(&current, *location)?;
                let (next, operation) = match op {
                    PostfixOp::Inc => (n.checked_add(1), "increment"),
                    PostfixOp::Dec => (n.checked_sub(1), "decrement"),
                };
                let next = next.ok_or_else(|| RuntimeFault::IntegerOverflow {
                    operation: operation.to_string(),
                    location: *location,
                })?;
                self.assign(name, ScriptValue::Int(next), *location)?;
                // Postfix yields the old value
                Ok(ScriptValue::Int(n))
            }

            Node::Call {
                name,
                args,
                location,
            } => self.call_function(name, args, *location),

            Node::Index {
                name,
                index,
                location,
            } => {
                if name != "arr" {
                    return Err(RuntimeFault::TypeMismatch {
                        expected: "'arr'",
                        found: format!("'{}'", name),
                        location: *location,
                    });
                }
                let index_value = self.evaluate_expr(index)?;
                let i = Self::expect_int(&index_value, *location)?;
                self.read_array(i, *location)
            }

            // Statements cannot appear in expression position
            other => Err(RuntimeFault::TypeMismatch {
                expected: "an expression",
                found: "a statement".to_string(),
                location: other.location(),
            }),
        }
    }

    /// Dispatch a call to a hook or builtin
    fn call_function(
        &mut self,
        name: &str,
        args: &[Node],
        location: SourceLocation,
    ) -> Result<ScriptValue, RuntimeFault> {
        // len(arr) reads the host array, so it is resolved before argument
        // evaluation (bare 'arr' is not a value anywhere else)
        if name == "len" {
            Self::arity(name, "1", args.len() == 1, args.len(), location)?;
            return match &args[0] {
                Node::Variable(var, _) if var == "arr" => {
                    Ok(ScriptValue::Int(self.working.len() as i64))
                }
                _ => Err(RuntimeFault::TypeMismatch {
                    expected: "'arr'",
                    found: "another value".to_string(),
                    location,
                }),
            };
        }

        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(self.evaluate_expr(arg)?);
        }

        match name {
            "compare" => {
                Self::arity(name, "2", values.len() == 2, values.len(), location)?;
                let i = self.array_index(&values[0], location)?;
                let j = self.array_index(&values[1], location)?;
                let outcome = CompareOutcome::from(self.working[i].cmp(&self.working[j]));
                self.record(Event::compare(i, j, outcome));
                Ok(ScriptValue::Int(outcome.signum()))
            }

            "swap" => {
                Self::arity(name, "2", values.len() == 2, values.len(), location)?;
                let i = self.array_index(&values[0], location)?;
                let j = self.array_index(&values[1], location)?;
                self.working.swap(i, j);
                self.record(Event::swap(i, j));
                Ok(ScriptValue::Int(0))
            }

            "set" => {
                Self::arity(name, "2", values.len() == 2, values.len(), location)?;
                let i = self.array_index(&values[0], location)?;
                let value = Self::expect_int(&values[1], location)?;
                let previous = self.working[i];
                self.working[i] = value;
                self.record(Event::set(i, value, previous));
                Ok(ScriptValue::Int(0))
            }

            "mark" => {
                Self::arity(name, "2", values.len() == 2, values.len(), location)?;
                let i = self.array_index(&values[0], location)?;
                let kind = match &values[1] {
                    ScriptValue::Str(s) => {
                        s.parse::<MarkKind>()
                            .map_err(|_| RuntimeFault::UnknownMarkKind {
                                kind: s.clone(),
                                location,
                            })?
                    }
                    other => {
                        return Err(RuntimeFault::TypeMismatch {
                            expected: "string",
                            found: other.type_name().to_string(),
                            location,
                        });
                    }
                };
                self.record(Event::mark(vec![i], kind));
                Ok(ScriptValue::Int(0))
            }

            "visit" => {
                Self::arity(name, "1", values.len() == 1, values.len(), location)?;
                let i = self.array_index(&values[0], location)?;
                self.record(Event::mark(vec![i], MarkKind::Visited));
                Ok(ScriptValue::Int(0))
            }

            "highlight" => {
                Self::arity(name, "at least 1", !values.is_empty(), values.len(), location)?;
                let mut lines = Vec::with_capacity(values.len());
                for value in &values {
                    let n = Self::expect_int(value, location)?;
                    let line = usize::try_from(n).map_err(|_| RuntimeFault::TypeMismatch {
                        expected: "non-negative int",
                        found: n.to_string(),
                        location,
                    })?;
                    lines.push(line);
                }
                self.record(Event::Highlight { lines });
                Ok(ScriptValue::Int(0))
            }

            "message" => {
                Self::arity(
                    name,
                    "1 or 2",
                    values.len() == 1 || values.len() == 2,
                    values.len(),
                    location,
                )?;
                let text = values[0].to_string();
                let highlight_line = match values.get(1) {
                    Some(value) => {
                        let n = Self::expect_int(value, location)?;
                        Some(usize::try_from(n).map_err(|_| RuntimeFault::TypeMismatch {
                            expected: "non-negative int",
                            found: n.to_string(),
                            location,
                        })?)
                    }
                    None => None,
                };
                self.record(Event::Message {
                    text,
                    level: None,
                    highlight_line,
                });
                Ok(ScriptValue::Int(0))
            }

            "log" => {
                Self::arity(name, "at least 1", !values.is_empty(), values.len(), location)?;
                let line = values
                    .iter()
                    .map(|v| v.to_string())
                    .collect::<Vec<_>>()
                    .join(" ");
                self.log_line(line);
                Ok(ScriptValue::Int(0))
            }

            "abs" => {
                Self::arity(name, "1", values.len() == 1, values.len(), location)?;
                let n = Self::expect_int(&values[0], location)?;
                n.checked_abs().map(ScriptValue::Int).ok_or_else(|| {
                    RuntimeFault::IntegerOverflow {
                        operation: "abs".to_string(),
                        location,
                    }
                })
            }

            "min" => {
                Self::arity(name, "2", values.len() == 2, values.len(), location)?;
                let a = Self::expect_int(&values[0], location)?;
                let b = Self::expect_int(&values[1], location)?;
                Ok(ScriptValue::Int(a.min(b)))
            }

            "max" => {
                Self::arity(name, "2", values.len() == 2, values.len(), location)?;
                let a = Self::expect_int(&values[0], location)?;
                let b = Self::expect_int(&values[1], location)?;
                Ok(ScriptValue::Int(a.max(b)))
            }

            _ => Err(RuntimeFault::UnknownFunction {
                name: name.to_string(),
                location,
            }),
        }
    }

    // ===== Helper methods =====

    fn declare(&mut self, name: String, value: ScriptValue) {
        let top = self.scopes.len() - 1;
        self.scopes[top].insert(name, value);
    }

    fn lookup(&self, name: &str, location: SourceLocation) -> Result<ScriptValue, RuntimeFault> {
        if name == "arr" {
            return Err(RuntimeFault::ArrayMisuse { location });
        }
        for scope in self.scopes.iter().rev() {
            if let Some(value) = scope.get(name) {
                return Ok(value.clone());
            }
        }
        Err(RuntimeFault::UndefinedVariable {
            name: name.to_string(),
            location,
        })
    }

    fn assign(
        &mut self,
        name: &str,
        value: ScriptValue,
        location: SourceLocation,
    ) -> Result<(), RuntimeFault> {
        if name == "arr" {
            return Err(RuntimeFault::ReservedName {
                name: name.to_string(),
                location,
            });
        }
        for scope in self.scopes.iter_mut().rev() {
            if let Some(slot) = scope.get_mut(name) {
                *slot = value;
                return Ok(());
            }
        }
        Err(RuntimeFault::UndefinedVariable {
            name: name.to_string(),
            location,
        })
    }

    /// Resolve a value to an in-bounds array index
    fn array_index(
        &self,
        value: &ScriptValue,
        location: SourceLocation,
    ) -> Result<usize, RuntimeFault> {
        let n = Self::expect_int(value, location)?;
        if n < 0 || n as usize >= self.working.len() {
            return Err(RuntimeFault::IndexOutOfBounds {
                index: n,
                len: self.working.len(),
                location,
            });
        }
        Ok(n as usize)
    }

    fn read_array(&self, index: i64, location: SourceLocation) -> Result<ScriptValue, RuntimeFault> {
        if index < 0 || index as usize >= self.working.len() {
            return Err(RuntimeFault::IndexOutOfBounds {
                index,
                len: self.working.len(),
                location,
            });
        }
        Ok(ScriptValue::Int(self.working[index as usize]))
    }

    fn expect_int(value: &ScriptValue, location: SourceLocation) -> Result<i64, RuntimeFault> {
        match value {
            ScriptValue::Int(n) => Ok(*n),
            other => Err(RuntimeFault::TypeMismatch {
                expected: "int",
                found: other.type_name().to_string(),
                location,
            }),
        }
    }

    fn arity(
        function: &str,
        expected: &'static str,
        ok: bool,
        found: usize,
        location: SourceLocation,
    ) -> Result<(), RuntimeFault> {
        if ok {
            Ok(())
        } else {
            Err(RuntimeFault::ArgumentCount {
                function: function.to_string(),
                expected,
                found,
                location,
            })
        }
    }

    fn apply_binary(
        op: BinOp,
        lhs: ScriptValue,
        rhs: ScriptValue,
        location: SourceLocation,
    ) -> Result<ScriptValue, RuntimeFault> {
        use ScriptValue::{Bool, Int, Str};

        match op {
            BinOp::Add => match (lhs, rhs) {
                (Int(a), Int(b)) => a
                    .checked_add(b)
                    .map(Int)
                    .ok_or_else(|| Self::overflow("addition", location)),
                // '+' concatenates as soon as either side is a string
                (Str(a), b) => Ok(Str(format!("{}{}", a, b))),
                (a, Str(b)) => Ok(Str(format!("{}{}", a, b))),
                (a, b) => Err(Self::int_mismatch(a, b, location)),
            },
            BinOp::Sub => {
                let (a, b) = Self::int_operands(lhs, rhs, location)?;
                a.checked_sub(b)
                    .map(Int)
                    .ok_or_else(|| Self::overflow("subtraction", location))
            }
            BinOp::Mul => {
                let (a, b) = Self::int_operands(lhs, rhs, location)?;
                a.checked_mul(b)
                    .map(Int)
                    .ok_or_else(|| Self::overflow("multiplication", location))
            }
            BinOp::Div => {
                let (a, b) = Self::int_operands(lhs, rhs, location)?;
                if b == 0 {
                    return Err(RuntimeFault::DivisionByZero { location });
                }
                a.checked_div(b)
                    .map(Int)
                    .ok_or_else(|| Self::overflow("division", location))
            }
            BinOp::Mod => {
                let (a, b) = Self::int_operands(lhs, rhs, location)?;
                if b == 0 {
                    return Err(RuntimeFault::DivisionByZero { location });
                }
                a.checked_rem(b)
                    .map(Int)
                    .ok_or_else(|| Self::overflow("remainder", location))
            }
            // Values of different kinds are simply unequal
            BinOp::Eq => Ok(Bool(lhs == rhs)),
            BinOp::Ne => Ok(Bool(lhs != rhs)),
            BinOp::Lt => {
                let (a, b) = Self::int_operands(lhs, rhs, location)?;
                Ok(Bool(a < b))
            }
            BinOp::Le => {
                let (a, b) = Self::int_operands(lhs, rhs, location)?;
                Ok(Bool(a <= b))
            }
            BinOp::Gt => {
                let (a, b) = Self::int_operands(lhs, rhs, location)?;
                Ok(Bool(a > b))
            }
            BinOp::Ge => {
                let (a, b) = Self::int_operands(lhs, rhs, location)?;
                Ok(Bool(a >= b))
            }
            // Short-circuit forms are handled by the evaluator; compound
            // assignment never produces these
            BinOp::And => Ok(Bool(lhs.truthy() && rhs.truthy())),
            BinOp::Or => Ok(Bool(lhs.truthy() || rhs.truthy())),
        }
    }

    fn int_operands(
        lhs: ScriptValue,
        rhs: ScriptValue,
        location: SourceLocation,
    ) -> Result<(i64, i64), RuntimeFault> {
        match (lhs, rhs) {
            (ScriptValue::Int(a), ScriptValue::Int(b)) => Ok((a, b)),
            (ScriptValue::Int(_), other) | (other, _) => {
                Err(RuntimeFault::TypeMismatch {
                    expected: "int",
                    found: other.type_name().to_string(),
                    location,
                })
            }
        }
    }

    fn int_mismatch(lhs: ScriptValue, rhs: ScriptValue, location: SourceLocation) -> RuntimeFault {
        let offender = if matches!(lhs, ScriptValue::Int(_)) {
            rhs
        } else {
            lhs
        };
        RuntimeFault::TypeMismatch {
            expected: "int",
            found: offender.type_name().to_string(),
            location,
        }
    }

    fn overflow(operation: &str, location: SourceLocation) -> RuntimeFault {
        RuntimeFault::IntegerOverflow {
            operation: operation.to_string(),
            location,
        }
    }

    /// Record an event, dropping it when the cap is reached
    fn record(&mut self, event: Event) {
        if self.events.len() >= self.limits.max_events {
            self.truncated = true;
            return;
        }
        self.events.push(TimedEvent {
            elapsed: self.started.elapsed(),
            event,
        });
    }

    /// Append a log line, dropping it silently when the cap is reached
    fn log_line(&mut self, line: String) {
        if self.logs.len() < self.limits.max_logs {
            self.logs.push(line);
        }
    }

    fn check_deadline(&self, location: SourceLocation) -> Result<(), RuntimeFault> {
        if Instant::now() >= self.deadline {
            return Err(RuntimeFault::TimeoutExceeded {
                limit_ms: self.limits.max_duration.as_millis() as u64,
                location,
            });
        }
        Ok(())
    }
}
