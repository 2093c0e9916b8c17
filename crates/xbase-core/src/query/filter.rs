//! Filter evaluation
//!
//! Evaluates a parsed [`Expression`] against one record. Record values are
//! raw text; they are read as numbers only where an operator or the other
//! operand asks for a number. Every failure is an [`EvalError`], which the
//! LIST engine treats as "record does not match".

use super::ast::*;
use super::parser::{ParseError, Parser};
use crate::table::{Record, Table};
use std::collections::HashMap;
use std::fmt;

/// Runtime value inside a filter
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Text(String),
    Number(f64),
    Boolean(bool),
}

impl Value {
    /// Truthiness used for the final result and for AND/OR/NOT operands
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Text(s) => !s.is_empty(),
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::Boolean(b) => *b,
        }
    }

    fn as_number(&self) -> Result<f64, EvalError> {
        match self {
            Value::Number(n) => Ok(*n),
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| EvalError::NotANumber(s.clone())),
            Value::Boolean(_) => Err(EvalError::TypeMismatch(format!(
                "boolean used as a number: {}",
                self
            ))),
        }
    }

    /// Compare values
    pub fn compare(&self, other: &Value, op: BinaryOperator) -> Result<bool, EvalError> {
        let ordering = match (self, other) {
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (Value::Boolean(a), Value::Boolean(b)) => match op {
                BinaryOperator::Eq => return Ok(a == b),
                BinaryOperator::Ne => return Ok(a != b),
                _ => {
                    return Err(EvalError::TypeMismatch(format!(
                        "cannot order booleans with {}",
                        op
                    )))
                }
            },
            (Value::Boolean(_), _) | (_, Value::Boolean(_)) => match op {
                BinaryOperator::Eq => return Ok(false),
                BinaryOperator::Ne => return Ok(true),
                _ => {
                    return Err(EvalError::TypeMismatch(format!(
                        "cannot compare {} {} {}",
                        self, op, other
                    )))
                }
            },
            _ => {
                let (a, b) = (self.as_number()?, other.as_number()?);
                a.partial_cmp(&b).ok_or_else(|| {
                    EvalError::TypeMismatch(format!("cannot compare {} {} {}", a, op, b))
                })?
            }
        };

        match op {
            BinaryOperator::Eq => Ok(ordering.is_eq()),
            BinaryOperator::Ne => Ok(ordering.is_ne()),
            BinaryOperator::Lt => Ok(ordering.is_lt()),
            BinaryOperator::Le => Ok(ordering.is_le()),
            BinaryOperator::Gt => Ok(ordering.is_gt()),
            BinaryOperator::Ge => Ok(ordering.is_ge()),
            _ => Err(EvalError::TypeMismatch(format!(
                "{} is not a comparison",
                op
            ))),
        }
    }

    fn arithmetic(&self, other: &Value, op: BinaryOperator) -> Result<Value, EvalError> {
        if let (BinaryOperator::Add, Value::Text(a), Value::Text(b)) = (op, self, other) {
            return Ok(Value::Text(format!("{}{}", a, b)));
        }

        let (a, b) = (self.as_number()?, other.as_number()?);
        let result = match op {
            BinaryOperator::Add => a + b,
            BinaryOperator::Sub => a - b,
            BinaryOperator::Mul => a * b,
            BinaryOperator::Div | BinaryOperator::Rem if b == 0.0 => {
                return Err(EvalError::DivisionByZero)
            }
            BinaryOperator::Div => a / b,
            BinaryOperator::Rem => a % b,
            _ => {
                return Err(EvalError::TypeMismatch(format!(
                    "{} is not an arithmetic operator",
                    op
                )))
            }
        };
        Ok(Value::Number(result))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Text(s) => write!(f, "\"{}\"", s),
            Value::Number(n) => write!(f, "{}", n),
            Value::Boolean(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

/// Name lookup for filter identifiers
pub trait Bindings {
    /// Value bound to a canonical field name
    fn lookup(&self, name: &str) -> Option<&str>;
}

/// Binds a table's own field names to one of its records.
pub struct RecordBindings<'a> {
    table: &'a Table,
    record: &'a Record,
}

impl<'a> RecordBindings<'a> {
    pub fn new(table: &'a Table, record: &'a Record) -> Self {
        Self { table, record }
    }
}

impl Bindings for RecordBindings<'_> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.table
            .field_index(name)
            .map(|idx| Table::value(self.record, idx))
    }
}

impl Bindings for HashMap<String, String> {
    fn lookup(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// A parsed filter, evaluated once per candidate record
#[derive(Debug, Clone, PartialEq)]
pub struct Filter {
    expr: Expression,
}

impl Filter {
    /// Parse filter text
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let expr = Parser::new(input)?.parse()?;
        Ok(Self { expr })
    }

    /// The parsed expression
    pub fn expression(&self) -> &Expression {
        &self.expr
    }

    /// Whether the bound record satisfies the filter
    pub fn matches(&self, bindings: &dyn Bindings) -> Result<bool, EvalError> {
        evaluate(&self.expr, bindings).map(|v| v.is_truthy())
    }
}

/// Evaluates an expression to a value
pub fn evaluate(expr: &Expression, bindings: &dyn Bindings) -> Result<Value, EvalError> {
    match expr {
        Expression::Field(name) => bindings
            .lookup(name)
            .map(|v| Value::Text(v.to_string()))
            .ok_or_else(|| EvalError::UnknownField(name.clone())),
        Expression::Literal(lit) => Ok(literal_to_value(lit)),
        Expression::BinaryOp { left, op, right } => {
            let l = evaluate(left, bindings)?;
            let r = evaluate(right, bindings)?;
            if op.is_comparison() {
                l.compare(&r, *op).map(Value::Boolean)
            } else {
                l.arithmetic(&r, *op)
            }
        }
        Expression::LogicalOp { left, op, right } => {
            let l = evaluate(left, bindings)?.is_truthy();
            let result = match op {
                LogicalOperator::And => l && evaluate(right, bindings)?.is_truthy(),
                LogicalOperator::Or => l || evaluate(right, bindings)?.is_truthy(),
            };
            Ok(Value::Boolean(result))
        }
        Expression::Not(inner) => Ok(Value::Boolean(!evaluate(inner, bindings)?.is_truthy())),
        Expression::Negate(inner) => Ok(Value::Number(-evaluate(inner, bindings)?.as_number()?)),
    }
}

fn literal_to_value(lit: &Literal) -> Value {
    match lit {
        Literal::Number(n) => Value::Number(*n),
        Literal::String(s) => Value::Text(s.clone()),
        Literal::Boolean(b) => Value::Boolean(*b),
    }
}

/// Evaluation faults
#[derive(Debug, Clone, PartialEq)]
pub enum EvalError {
    UnknownField(String),
    NotANumber(String),
    TypeMismatch(String),
    DivisionByZero,
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::UnknownField(name) => write!(f, "Unknown field: {}", name),
            EvalError::NotANumber(s) => write!(f, "Not a number: '{}'", s),
            EvalError::TypeMismatch(msg) => write!(f, "Type mismatch: {}", msg),
            EvalError::DivisionByZero => write!(f, "Division by zero"),
        }
    }
}

impl std::error::Error for EvalError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn bindings(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn check(filter: &str, vars: &HashMap<String, String>) -> Result<bool, EvalError> {
        Filter::parse(filter).unwrap().matches(vars)
    }

    #[test]
    fn test_text_equality() {
        let vars = bindings(&[("ID", "1001"), ("NAME", "ALICE")]);

        assert_eq!(check("ID == \"1001\"", &vars), Ok(true));
        assert_eq!(check("ID == \"9999\"", &vars), Ok(false));
        assert_eq!(check("name != 'BOB'", &vars), Ok(true));
        assert_eq!(check("NAME < 'BOB'", &vars), Ok(true));
    }

    #[test]
    fn test_numeric_comparison_reads_text_as_number() {
        let vars = bindings(&[("AGE", " 42"), ("NAME", "ALICE")]);

        assert_eq!(check("AGE > 30", &vars), Ok(true));
        assert_eq!(check("AGE == 42.0", &vars), Ok(true));
        assert_eq!(check("AGE * 2 - 4 = 80", &vars), Ok(true));
        assert!(matches!(
            check("NAME > 3", &vars),
            Err(EvalError::NotANumber(_))
        ));
    }

    #[test]
    fn test_logic_short_circuits() {
        let vars = bindings(&[("CITY", "NYC"), ("QTY", "0")]);

        assert_eq!(check("CITY == 'NYC' OR MISSING == 1", &vars), Ok(true));
        assert_eq!(check("CITY == 'LA' AND MISSING == 1", &vars), Ok(false));
        assert_eq!(
            check("CITY == 'LA' OR MISSING == 1", &vars),
            Err(EvalError::UnknownField("MISSING".to_string()))
        );
        assert_eq!(check("NOT (CITY == 'LA')", &vars), Ok(true));
        assert_eq!(check("QTY + 0", &vars), Ok(false));
        assert_eq!(check("CITY", &vars), Ok(true));
    }

    #[test]
    fn test_concatenation_and_faults() {
        let vars = bindings(&[("FIRST", "AL"), ("LAST", "ICE"), ("N", "5")]);

        assert_eq!(check("FIRST + LAST == 'ALICE'", &vars), Ok(true));
        assert_eq!(check("N / 0 > 1", &vars), Err(EvalError::DivisionByZero));
        assert!(matches!(
            check("TRUE < FALSE", &vars),
            Err(EvalError::TypeMismatch(_))
        ));
        assert_eq!(check("TRUE == 'x'", &vars), Ok(false));
    }

    #[test]
    fn test_operator_class_mismatch_is_an_error() {
        let one = Value::Number(1.0);
        let two = Value::Number(2.0);
        assert!(matches!(
            one.compare(&two, BinaryOperator::Add),
            Err(EvalError::TypeMismatch(_))
        ));
        assert!(matches!(
            Value::Text("A".into()).compare(&Value::Text("B".into()), BinaryOperator::Mul),
            Err(EvalError::TypeMismatch(_))
        ));
        assert!(matches!(
            one.arithmetic(&two, BinaryOperator::Lt),
            Err(EvalError::TypeMismatch(_))
        ));
        assert_eq!(one.arithmetic(&two, BinaryOperator::Add), Ok(Value::Number(3.0)));
    }

    #[test]
    fn test_record_bindings() {
        let mut table = Table::new("CUSTOMERS");
        table.add_field(crate::field::FieldDef::new("ID", "C", 4, 0));
        table.add_field(crate::field::FieldDef::new("NAME", "C", 10, 0));
        table
            .add_record(vec!["1001".to_string(), "ALICE".to_string()])
            .unwrap();

        let record = &table.records()[0];
        let bindings = RecordBindings::new(&table, record);
        let filter = Filter::parse("id == '1001' and NAME == 'ALICE'").unwrap();
        assert_eq!(filter.matches(&bindings), Ok(true));

        let related = Filter::parse("CUSTOMERS.NAME == 'ALICE'").unwrap();
        assert!(related.matches(&bindings).is_err());
    }
}
