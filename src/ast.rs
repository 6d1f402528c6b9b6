use std::{fmt, rc::Rc};

use crate::util::num::format_number;

/// Represents a literal value in the language.
///
/// `LiteralValue` covers the raw constants that can appear directly in source
/// code: numbers, strings and the two boolean keywords.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A double precision number literal such as `3` or `0.75`.
    Number(f64),
    /// A double quoted string literal with escapes already resolved.
    String(String),
    /// `true` or `false`.
    Bool(bool),
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

/// One dotted hop in a property chain, e.g. `.title` or `.set("x")`.
#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    /// The member name.
    pub name:      String,
    /// Present when the hop is a method call.
    pub arguments: Option<Vec<Expr>>,
}

/// An `else if <condition>: <then>` clause.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseIf {
    /// The clause condition.
    pub condition: Expr,
    /// Evaluated when the condition is not `false`.
    pub then:      Expr,
}

/// A sequence of statements.
///
/// Used both for the whole program and for every `{ ... }` block.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    /// Statements in source order.
    pub statements: Vec<Expr>,
}

/// A function expression: `function name?(params): body`.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDef {
    /// The optional function name.
    pub name:       Option<String>,
    /// Parameter names, bound positionally on invocation.
    pub parameters: Vec<String>,
    /// A block body or a single expression.
    pub body:       Expr,
}

/// An abstract syntax tree (AST) node.
///
/// The language has no separate statement forms: every construct, including
/// blocks, conditionals and function definitions, is an expression that
/// produces a value.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value.
    Literal(LiteralValue),
    /// A variable reference with an optional property chain.
    Variable {
        /// The base variable name.
        name:       String,
        /// Dotted hops resolved left to right.
        properties: Vec<Property>,
    },
    /// Invocation of an arbitrary callee expression.
    Call {
        /// The expression producing the callable.
        callee:    Box<Self>,
        /// Argument expressions, evaluated left to right.
        arguments: Vec<Self>,
    },
    /// A binary operation.
    Binary {
        /// The operator.
        operator: BinaryOperator,
        /// Left operand.
        left:     Box<Self>,
        /// Right operand.
        right:    Box<Self>,
    },
    /// `left = right` or `final left = right`.
    Assign {
        /// The target; must be a bare variable when evaluated.
        left:     Box<Self>,
        /// The assigned value.
        right:    Box<Self>,
        /// Whether the binding is defined as constant.
        is_final: bool,
    },
    /// `if` with any number of `else if` clauses and an optional `else`.
    If {
        /// The primary condition.
        condition:   Box<Self>,
        /// Evaluated when the primary condition is not `false`.
        then_branch: Box<Self>,
        /// Further clauses tried in source order.
        else_ifs:    Vec<ElseIf>,
        /// Evaluated when no clause matched.
        else_branch: Option<Box<Self>>,
    },
    /// A `{ ... }` block.
    Program(Program),
    /// A function definition.
    Function(Rc<FunctionDef>),
    /// `return <expr>;` inside a function body block.
    Return(Box<Self>),
}

impl Expr {
    /// The number of nodes on the longest path from this node down to a leaf.
    ///
    /// Evaluating an expression nests at most this deep, not counting the
    /// bodies of the functions it calls.
    ///
    /// ## Example
    /// ```
    /// use embedscript::parse;
    ///
    /// let program = parse("a = 1 + 2 * 3").unwrap();
    /// assert_eq!(program.statements[0].height(), 4);
    /// ```
    #[must_use]
    pub fn height(&self) -> usize {
        1 + match self {
            Self::Literal(_) => 0,
            Self::Variable { properties, .. } => {
                deepest(properties.iter().filter_map(|p| p.arguments.as_ref()).flatten())
            },
            Self::Call { callee, arguments } => {
                deepest(std::iter::once(callee.as_ref()).chain(arguments))
            },
            Self::Binary { left, right, .. } | Self::Assign { left, right, .. } => {
                left.height().max(right.height())
            },
            Self::If { condition,
                       then_branch,
                       else_ifs,
                       else_branch, } => {
                let clauses = else_ifs.iter().flat_map(|c| [&c.condition, &c.then]);
                deepest([condition.as_ref(), then_branch.as_ref()].into_iter()
                                                                  .chain(clauses)
                                                                  .chain(else_branch.as_deref()))
            },
            Self::Program(program) => deepest(&program.statements),
            Self::Function(def) => def.body.height(),
            Self::Return(expr) => expr.height(),
        }
    }
}

fn deepest<'a>(items: impl IntoIterator<Item = &'a Expr>) -> usize {
    items.into_iter().map(Expr::height).max().unwrap_or(0)
}

/// Represents a binary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`)
    Div,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Add and store (`+=`)
    AddAssign,
    /// Subtract and store (`-=`)
    SubAssign,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`&&`)
    And,
    /// Logical or (`||`)
    Or,
}

impl BinaryOperator {
    /// Maps an operator token's text to a binary operator.
    ///
    /// ## Example
    /// ```
    /// use embedscript::ast::BinaryOperator;
    ///
    /// assert_eq!(BinaryOperator::from_symbol("&&"), Some(BinaryOperator::And));
    /// assert_eq!(BinaryOperator::from_symbol("="), None);
    /// ```
    #[must_use]
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        use BinaryOperator::{
            Add, AddAssign, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul,
            NotEqual, Or, Pow, Sub, SubAssign,
        };
        let op = match symbol {
            "+" => Add,
            "-" => Sub,
            "*" => Mul,
            "/" => Div,
            "%" => Mod,
            "**" => Pow,
            "+=" => AddAssign,
            "-=" => SubAssign,
            "<" => Less,
            ">" => Greater,
            "<=" => LessEqual,
            ">=" => GreaterEqual,
            "==" => Equal,
            "!=" => NotEqual,
            "&&" => And,
            "||" => Or,
            _ => return None,
        };
        Some(op)
    }

    /// The source text of the operator.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        use BinaryOperator::{
            Add, AddAssign, And, Div, Equal, Greater, GreaterEqual, Less, LessEqual, Mod, Mul,
            NotEqual, Or, Pow, Sub, SubAssign,
        };
        match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            Mod => "%",
            Pow => "**",
            AddAssign => "+=",
            SubAssign => "-=",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "&&",
            Or => "||",
        }
    }
}

impl fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

fn write_list(f: &mut fmt::Formatter<'_>, items: &[Expr]) -> fmt::Result {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            write!(f, ", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{ ")?;
        for statement in &self.statements {
            write!(f, "{statement}; ")?;
        }
        write!(f, "}}")
    }
}

/// Renders the node back to source-like text, used in error messages.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(LiteralValue::Number(n)) => write!(f, "{}", format_number(*n)),
            Self::Literal(LiteralValue::String(s)) => write!(f, "{s:?}"),
            Self::Literal(LiteralValue::Bool(b)) => write!(f, "{b}"),
            Self::Variable { name, properties } => {
                write!(f, "{name}")?;
                for property in properties {
                    write!(f, ".{}", property.name)?;
                    if let Some(arguments) = &property.arguments {
                        write!(f, "(")?;
                        write_list(f, arguments)?;
                        write!(f, ")")?;
                    }
                }
                Ok(())
            },
            Self::Call { callee, arguments } => {
                write!(f, "{callee}(")?;
                write_list(f, arguments)?;
                write!(f, ")")
            },
            Self::Binary { operator,
                           left,
                           right, } => write!(f, "({left} {operator} {right})"),
            Self::Assign { left,
                           right,
                           is_final, } => {
                if *is_final {
                    write!(f, "final ")?;
                }
                write!(f, "{left} = {right}")
            },
            Self::If { condition,
                       then_branch,
                       else_ifs,
                       else_branch, } => {
                write!(f, "if {condition}: {then_branch}")?;
                for clause in else_ifs {
                    write!(f, " else if {}: {}", clause.condition, clause.then)?;
                }
                if let Some(else_branch) = else_branch {
                    write!(f, " else: {else_branch}")?;
                }
                Ok(())
            },
            Self::Program(program) => write!(f, "{program}"),
            Self::Function(def) => {
                write!(f,
                       "function {}({}): {}",
                       def.name.as_deref().unwrap_or_default(),
                       def.parameters.join(", "),
                       def.body)
            },
            Self::Return(expr) => write!(f, "return {expr}"),
        }
    }
}
