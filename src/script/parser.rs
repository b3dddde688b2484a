use crate::script::ast::*;
use crate::script::lexer::{LexError, Lexer, Token};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Error)]
#[error("Parse error at line {}, column {}: {message}", .location.line, .location.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Statements and expressions may nest at most this deep. The parser and
/// the runner both recurse per nesting level, so AST depth has to stay
/// far below the host stack.
const MAX_NESTING: usize = 128;

/// Recursive descent parser for visualization scripts
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
    loop_depth: usize,
    nesting: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            loop_depth: 0,
            nesting: 0,
        })
    }

    /// Parse the entire script (a flat statement list)
    pub fn parse_script(&mut self) -> Result<Script, ParseError> {
        let mut statements = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        Ok(Script { statements })
    }

    /// Parse a single statement
    fn parse_statement(&mut self) -> Result<Node, ParseError> {
        let loc = self.current_location();

        // Check for keywords first
        if self.match_token(&Token::Let(loc)) {
            let stmt = self.parse_let_binding()?;
            self.expect_token(
                &Token::Semicolon(self.current_location()),
                "Expected ';' after declaration",
            )?;
            return Ok(stmt);
        }

        if self.match_token(&Token::If(loc)) {
            return self.parse_if_statement();
        }

        if self.match_token(&Token::While(loc)) {
            return self.parse_while_statement();
        }

        if self.match_token(&Token::For(loc)) {
            return self.parse_for_statement();
        }

        if self.match_token(&Token::Break(loc)) {
            if self.loop_depth == 0 {
                return Err(ParseError {
                    message: "'break' outside of a loop".to_string(),
                    location: loc,
                });
            }
            self.expect_token(
                &Token::Semicolon(self.current_location()),
                "Expected ';' after 'break'",
            )?;
            return Ok(Node::Break { location: loc });
        }

        if self.match_token(&Token::Continue(loc)) {
            if self.loop_depth == 0 {
                return Err(ParseError {
                    message: "'continue' outside of a loop".to_string(),
                    location: loc,
                });
            }
            self.expect_token(
                &Token::Semicolon(self.current_location()),
                "Expected ';' after 'continue'",
            )?;
            return Ok(Node::Continue { location: loc });
        }

        if self.match_token(&Token::Return(loc)) {
            self.expect_token(
                &Token::Semicolon(self.current_location()),
                "Expected ';' after 'return'",
            )?;
            return Ok(Node::Return { location: loc });
        }

        // Otherwise, an assignment or expression statement
        let stmt = self.parse_assignment_or_expression()?;
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            "Expected ';' after statement",
        )?;

        match stmt {
            node @ (Node::Assignment { .. } | Node::CompoundAssignment { .. }) => Ok(node),
            expr => Ok(Node::ExpressionStatement {
                expr: Box::new(expr),
                location: loc,
            }),
        }
    }

    /// Parse a let binding: let name = expr (semicolon handled by callers)
    fn parse_let_binding(&mut self) -> Result<Node, ParseError> {
        let loc = self.previous_location();
        let name = self.expect_identifier()?;

        if name == "arr" {
            return Err(ParseError {
                message: "'arr' is provided by the host and cannot be redeclared".to_string(),
                location: loc,
            });
        }

        self.expect_token(
            &Token::Eq(self.current_location()),
            "Expected '=' after variable name",
        )?;
        let init = Box::new(self.parse_expression()?);

        Ok(Node::Let {
            name,
            init,
            location: loc,
        })
    }

    /// Parse if statement: if (cond) { ... } [else { ... } | else if ...]
    fn parse_if_statement(&mut self) -> Result<Node, ParseError> {
        let loc = self.previous_location();

        self.expect_token(
            &Token::LParen(self.current_location()),
            "Expected '(' after 'if'",
        )?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_token(
            &Token::RParen(self.current_location()),
            "Expected ')' after condition",
        )?;

        let then_branch = self.parse_statement_or_block()?;

        let else_branch = if self.match_token(&Token::Else(self.current_location())) {
            if self.match_token(&Token::If(self.current_location())) {
                // else if: wrap the nested if as the sole else statement
                Some(vec![self.nested(Self::parse_if_statement)?])
            } else {
                Some(self.parse_statement_or_block()?)
            }
        } else {
            None
        };

        Ok(Node::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    /// Parse while statement: while (cond) { ... }
    fn parse_while_statement(&mut self) -> Result<Node, ParseError> {
        let loc = self.previous_location();

        self.expect_token(
            &Token::LParen(self.current_location()),
            "Expected '(' after 'while'",
        )?;
        let condition = Box::new(self.parse_expression()?);
        self.expect_token(
            &Token::RParen(self.current_location()),
            "Expected ')' after condition",
        )?;

        self.loop_depth += 1;
        let body = self.parse_statement_or_block();
        self.loop_depth -= 1;

        Ok(Node::While {
            condition,
            body: body?,
            location: loc,
        })
    }

    /// Parse for statement: for (init; cond; step) { ... }
    fn parse_for_statement(&mut self) -> Result<Node, ParseError> {
        let loc = self.previous_location();

        self.expect_token(
            &Token::LParen(self.current_location()),
            "Expected '(' after 'for'",
        )?;

        let init = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(Box::new(self.parse_for_clause()?))
        };
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            "Expected ';' after for initializer",
        )?;

        let condition = if self.check(&Token::Semicolon(self.current_location())) {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.expect_token(
            &Token::Semicolon(self.current_location()),
            "Expected ';' after for condition",
        )?;

        let step = if self.check(&Token::RParen(self.current_location())) {
            None
        } else {
            Some(Box::new(self.parse_for_clause()?))
        };
        self.expect_token(
            &Token::RParen(self.current_location()),
            "Expected ')' after for clauses",
        )?;

        self.loop_depth += 1;
        let body = self.parse_statement_or_block();
        self.loop_depth -= 1;

        Ok(Node::For {
            init,
            condition,
            step,
            body: body?,
            location: loc,
        })
    }

    /// Parse a for-header clause: a let binding, an assignment, or a bare
    /// expression, without a trailing semicolon.
    fn parse_for_clause(&mut self) -> Result<Node, ParseError> {
        if self.match_token(&Token::Let(self.current_location())) {
            return self.parse_let_binding();
        }
        self.parse_assignment_or_expression()
    }

    /// Parse a braced block or a single statement
    fn parse_statement_or_block(&mut self) -> Result<Vec<Node>, ParseError> {
        if self.match_token(&Token::LBrace(self.current_location())) {
            let mut statements = Vec::new();
            while !self.check(&Token::RBrace(self.current_location())) && !self.is_at_end() {
                statements.push(self.nested(Self::parse_statement)?);
            }
            self.expect_token(
                &Token::RBrace(self.current_location()),
                "Expected '}' after block",
            )?;
            Ok(statements)
        } else {
            // Single statement
            Ok(vec![self.nested(Self::parse_statement)?])
        }
    }

    /// Parse an assignment statement or a bare expression, without the
    /// trailing semicolon. Assignments are statements, not expressions, so
    /// they are keyed on an identifier directly followed by an assignment
    /// operator.
    fn parse_assignment_or_expression(&mut self) -> Result<Node, ParseError> {
        let loc = self.current_location();

        if let Token::Ident(name, _) = self.peek_token() {
            let op = match self.peek_ahead(1) {
                Some(Token::Eq(_)) => Some(None),
                Some(Token::PlusEq(_)) => Some(Some(BinOp::Add)),
                Some(Token::MinusEq(_)) => Some(Some(BinOp::Sub)),
                Some(Token::StarEq(_)) => Some(Some(BinOp::Mul)),
                Some(Token::SlashEq(_)) => Some(Some(BinOp::Div)),
                Some(Token::PercentEq(_)) => Some(Some(BinOp::Mod)),
                _ => None,
            };
            if let Some(compound) = op {
                self.advance(); // identifier
                self.advance(); // assignment operator
                let rhs = Box::new(self.parse_expression()?);
                return Ok(match compound {
                    None => Node::Assignment {
                        name,
                        rhs,
                        location: loc,
                    },
                    Some(op) => Node::CompoundAssignment {
                        name,
                        op,
                        rhs,
                        location: loc,
                    },
                });
            }
        }

        let expr = self.parse_expression()?;

        // Writes through indexing get a pointed message instead of a
        // generic "expected ';'".
        if matches!(expr, Node::Index { .. }) && self.peek_is_assignment_op() {
            return Err(ParseError {
                message: "the array cannot be assigned through indexing, use set(index, value) or swap(i, j)"
                    .to_string(),
                location: self.current_location(),
            });
        }

        Ok(expr)
    }

    fn peek_is_assignment_op(&self) -> bool {
        matches!(
            self.peek(),
            Token::Eq(_)
                | Token::PlusEq(_)
                | Token::MinusEq(_)
                | Token::StarEq(_)
                | Token::SlashEq(_)
                | Token::PercentEq(_)
        )
    }

    /// Parse expression (top-level entry point)
    fn parse_expression(&mut self) -> Result<Node, ParseError> {
        self.nested(Self::parse_logical_or)
    }

    /// Parse logical OR (||)
    fn parse_logical_or(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_logical_and()?;

        while self.match_token(&Token::OrOr(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_logical_and()?);
            left = Node::BinaryOp {
                op: BinOp::Or,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse logical AND (&&)
    fn parse_logical_and(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_equality()?;

        while self.match_token(&Token::AndAnd(self.current_location())) {
            let loc = self.previous_location();
            let right = Box::new(self.parse_equality()?);
            left = Node::BinaryOp {
                op: BinOp::And,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse equality (== and !=)
    fn parse_equality(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_relational()?;

        loop {
            let op = if self.match_token(&Token::EqEq(self.current_location())) {
                BinOp::Eq
            } else if self.match_token(&Token::NotEq(self.current_location())) {
                BinOp::Ne
            } else {
                break;
            };
            let loc = self.previous_location();
            let right = Box::new(self.parse_relational()?);
            left = Node::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse relational (<, <=, >, >=)
    fn parse_relational(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_additive()?;

        loop {
            let op = if self.match_token(&Token::Lt(self.current_location())) {
                BinOp::Lt
            } else if self.match_token(&Token::Le(self.current_location())) {
                BinOp::Le
            } else if self.match_token(&Token::Gt(self.current_location())) {
                BinOp::Gt
            } else if self.match_token(&Token::Ge(self.current_location())) {
                BinOp::Ge
            } else {
                break;
            };
            let loc = self.previous_location();
            let right = Box::new(self.parse_additive()?);
            left = Node::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse additive (+ and -)
    fn parse_additive(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = if self.match_token(&Token::Plus(self.current_location())) {
                BinOp::Add
            } else if self.match_token(&Token::Minus(self.current_location())) {
                BinOp::Sub
            } else {
                break;
            };
            let loc = self.previous_location();
            let right = Box::new(self.parse_multiplicative()?);
            left = Node::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse multiplicative (*, /, %)
    fn parse_multiplicative(&mut self) -> Result<Node, ParseError> {
        let mut left = self.parse_unary()?;

        loop {
            let op = if self.match_token(&Token::Star(self.current_location())) {
                BinOp::Mul
            } else if self.match_token(&Token::Slash(self.current_location())) {
                BinOp::Div
            } else if self.match_token(&Token::Percent(self.current_location())) {
                BinOp::Mod
            } else {
                break;
            };
            let loc = self.previous_location();
            let right = Box::new(self.parse_unary()?);
            left = Node::BinaryOp {
                op,
                left: Box::new(left),
                right,
                location: loc,
            };
        }

        Ok(left)
    }

    /// Parse unary (-x, !x)
    fn parse_unary(&mut self) -> Result<Node, ParseError> {
        if self.match_token(&Token::Minus(self.current_location())) {
            let loc = self.previous_location();
            let operand = Box::new(self.nested(Self::parse_unary)?);
            return Ok(Node::UnaryOp {
                op: UnOp::Neg,
                operand,
                location: loc,
            });
        }

        if self.match_token(&Token::Bang(self.current_location())) {
            let loc = self.previous_location();
            let operand = Box::new(self.nested(Self::parse_unary)?);
            return Ok(Node::UnaryOp {
                op: UnOp::Not,
                operand,
                location: loc,
            });
        }

        self.parse_postfix()
    }

    /// Parse postfix (x++ and x--)
    fn parse_postfix(&mut self) -> Result<Node, ParseError> {
        let expr = self.parse_primary()?;

        let op = if self.check(&Token::PlusPlus(self.current_location())) {
            Some(PostfixOp::Inc)
        } else if self.check(&Token::MinusMinus(self.current_location())) {
            Some(PostfixOp::Dec)
        } else {
            None
        };

        if let Some(op) = op {
            self.advance();
            let loc = self.previous_location();
            return match expr {
                Node::Variable(name, _) => Ok(Node::Postfix { name, op, location: loc }),
                Node::Index { .. } => Err(ParseError {
                    message: "array cells cannot be modified in place, use set(index, value)"
                        .to_string(),
                    location: loc,
                }),
                _ => Err(ParseError {
                    message: "'++' and '--' need a variable".to_string(),
                    location: loc,
                }),
            };
        }

        Ok(expr)
    }

    /// Parse primary expression: literal, variable, call, index, or group
    fn parse_primary(&mut self) -> Result<Node, ParseError> {
        let loc = self.current_location();

        if let Token::IntLiteral(value, _) = self.peek_token() {
            self.advance();
            return Ok(Node::IntLiteral(value, loc));
        }

        if let Token::StrLiteral(value, _) = self.peek_token() {
            self.advance();
            return Ok(Node::StrLiteral(value, loc));
        }

        if self.match_token(&Token::True(loc)) {
            return Ok(Node::BoolLiteral(true, loc));
        }

        if self.match_token(&Token::False(loc)) {
            return Ok(Node::BoolLiteral(false, loc));
        }

        if self.match_token(&Token::LParen(loc)) {
            let expr = self.parse_expression()?;
            self.expect_token(
                &Token::RParen(self.current_location()),
                "Expected ')' after expression",
            )?;
            return Ok(expr);
        }

        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();

            if self.match_token(&Token::LParen(self.current_location())) {
                let args = self.parse_argument_list()?;
                self.expect_token(
                    &Token::RParen(self.current_location()),
                    "Expected ')' after arguments",
                )?;
                return Ok(Node::Call {
                    name,
                    args,
                    location: loc,
                });
            }

            if self.match_token(&Token::LBracket(self.current_location())) {
                let index = Box::new(self.parse_expression()?);
                self.expect_token(
                    &Token::RBracket(self.current_location()),
                    "Expected ']' after index",
                )?;
                return Ok(Node::Index {
                    name,
                    index,
                    location: loc,
                });
            }

            return Ok(Node::Variable(name, loc));
        }

        Err(ParseError {
            message: format!("Expected expression, found {}", self.peek()),
            location: loc,
        })
    }

    /// Parse comma-separated call arguments
    fn parse_argument_list(&mut self) -> Result<Vec<Node>, ParseError> {
        let mut args = Vec::new();

        if self.check(&Token::RParen(self.current_location())) {
            return Ok(args);
        }

        loop {
            args.push(self.parse_expression()?);
            if !self.match_token(&Token::Comma(self.current_location())) {
                break;
            }
        }

        Ok(args)
    }

    // ===== Helper methods =====

    /// Run one nested parse step, rejecting the script once statements or
    /// expressions nest deeper than [`MAX_NESTING`] levels.
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.nesting >= MAX_NESTING {
            return Err(ParseError {
                message: format!("nesting deeper than {} levels", MAX_NESTING),
                location: self.current_location(),
            });
        }
        self.nesting += 1;
        let result = parse(self);
        self.nesting -= 1;
        result
    }

    fn match_token(&mut self, token: &Token) -> bool {
        if std::mem::discriminant(&self.peek_token()) == std::mem::discriminant(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(&self.peek_token()) == std::mem::discriminant(token)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek_token(), Token::Eof(_))
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn peek_token(&self) -> Token {
        self.tokens[self.position].clone()
    }

    fn peek_ahead(&self, n: usize) -> Option<&Token> {
        self.tokens.get(self.position + n)
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.position - 1]
    }

    fn previous_location(&self) -> SourceLocation {
        self.previous().location()
    }

    fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.check(token) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek()),
                location: self.current_location(),
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            Err(ParseError {
                message: format!("Expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_let_and_call() {
        let source = "let i = 0; mark(i, \"current\");";
        let mut parser = Parser::new(source).unwrap();
        let script = parser.parse_script().unwrap();

        assert_eq!(script.statements.len(), 2);
        assert!(matches!(script.statements[0], Node::Let { ref name, .. } if name == "i"));
        match &script.statements[1] {
            Node::ExpressionStatement { expr, .. } => {
                assert!(matches!(**expr, Node::Call { ref name, ref args, .. }
                    if name == "mark" && args.len() == 2));
            }
            other => panic!("Expected expression statement, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_while_with_index() {
        let source = "let i = 0; while (i < len(arr)) { visit(i); i++; }";
        let mut parser = Parser::new(source).unwrap();
        let script = parser.parse_script().unwrap();

        match &script.statements[1] {
            Node::While { body, .. } => {
                assert_eq!(body.len(), 2);
                match &body[1] {
                    Node::ExpressionStatement { expr, .. } => {
                        assert!(matches!(**expr, Node::Postfix { ref name, op: PostfixOp::Inc, .. }
                            if name == "i"));
                    }
                    other => panic!("Expected postfix statement, got {:?}", other),
                }
            }
            other => panic!("Expected while, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_for_header() {
        let source = "for (let i = 0; i < 4; i++) { visit(i); }";
        let mut parser = Parser::new(source).unwrap();
        let script = parser.parse_script().unwrap();

        match &script.statements[0] {
            Node::For {
                init,
                condition,
                step,
                body,
                ..
            } => {
                assert!(matches!(init.as_deref(), Some(Node::Let { .. })));
                assert!(matches!(condition.as_deref(), Some(Node::BinaryOp { op: BinOp::Lt, .. })));
                assert!(matches!(step.as_deref(), Some(Node::Postfix { .. })));
                assert_eq!(body.len(), 1);
            }
            other => panic!("Expected for, got {:?}", other),
        }
    }

    #[test]
    fn test_else_if_chain() {
        let source = "if (a == 1) { log(1); } else if (a == 2) { log(2); } else { log(3); }";
        let mut parser = Parser::new(source).unwrap();
        let script = parser.parse_script().unwrap();

        match &script.statements[0] {
            Node::If { else_branch, .. } => {
                let else_stmts = else_branch.as_ref().expect("should have else branch");
                assert_eq!(else_stmts.len(), 1);
                assert!(matches!(else_stmts[0], Node::If { .. }));
            }
            other => panic!("Expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_break_outside_loop_is_rejected() {
        let err = Parser::new("break;").unwrap().parse_script().unwrap_err();
        assert!(err.message.contains("outside of a loop"));

        let err = Parser::new("if (true) { continue; }")
            .unwrap()
            .parse_script()
            .unwrap_err();
        assert!(err.message.contains("outside of a loop"));
    }

    #[test]
    fn test_index_assignment_is_rejected_with_hint() {
        let err = Parser::new("arr[0] = 5;").unwrap().parse_script().unwrap_err();
        assert!(err.message.contains("set(index, value)"), "{}", err.message);

        let err = Parser::new("arr[0]++;").unwrap().parse_script().unwrap_err();
        assert!(err.message.contains("set(index, value)"), "{}", err.message);
    }

    #[test]
    fn test_let_arr_is_rejected() {
        let err = Parser::new("let arr = 3;").unwrap().parse_script().unwrap_err();
        assert!(err.message.contains("cannot be redeclared"));
    }

    #[test]
    fn test_error_location_points_at_the_line() {
        let source = "let a = 1;\nlet b = ;";
        let err = Parser::new(source).unwrap().parse_script().unwrap_err();
        assert_eq!(err.location.line, 2);
    }

    #[test]
    fn test_operator_precedence() {
        let source = "let x = 1 + 2 * 3;";
        let mut parser = Parser::new(source).unwrap();
        let script = parser.parse_script().unwrap();

        match &script.statements[0] {
            Node::Let { init, .. } => match init.as_ref() {
                Node::BinaryOp { op: BinOp::Add, right, .. } => {
                    assert!(matches!(**right, Node::BinaryOp { op: BinOp::Mul, .. }));
                }
                other => panic!("Expected addition at the root, got {:?}", other),
            },
            other => panic!("Expected let, got {:?}", other),
        }
    }

    #[test]
    fn test_nesting_depth_is_capped() {
        let parens = |n: usize| format!("let x = {}1{};", "(".repeat(n), ")".repeat(n));

        assert!(Parser::new(&parens(64)).unwrap().parse_script().is_ok());

        let err = Parser::new(&parens(4096)).unwrap().parse_script().unwrap_err();
        assert!(err.message.contains("nesting"), "{}", err.message);

        let minus_chain = format!("let x = {}5;", "-".repeat(4096));
        let err = Parser::new(&minus_chain).unwrap().parse_script().unwrap_err();
        assert!(err.message.contains("nesting"), "{}", err.message);

        let else_if_chain = format!(
            "if (true) {{ visit(0); }}{}",
            " else if (true) { visit(0); }".repeat(4096)
        );
        let err = Parser::new(&else_if_chain).unwrap().parse_script().unwrap_err();
        assert!(err.message.contains("nesting"), "{}", err.message);
    }

    #[test]
    fn test_parse_error_display_names_the_location() {
        let err = Parser::new("let a = 1;\nlet b = ;")
            .unwrap()
            .parse_script()
            .unwrap_err();
        assert!(
            err.to_string().starts_with("Parse error at line 2, column"),
            "{}",
            err
        );
    }
}
