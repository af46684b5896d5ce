//! Token types for the SQL lexer.

use std::fmt;

use super::Span;

/// SQL keywords.
///
/// Lookup is case-insensitive. Keywords outside the reserved set may still be
/// used as identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // Queries
    Select,
    From,
    Where,
    Order,
    By,
    Group,
    Having,
    Limit,
    Offset,
    Distinct,
    All,
    As,
    Top,
    Percent,
    Ties,
    Fetch,
    First,
    Next,
    Rows,
    Row,
    Only,
    Asc,
    Desc,
    Nulls,
    Last,
    Into,

    // Joins
    Join,
    Inner,
    Left,
    Right,
    Full,
    Outer,
    Cross,
    On,
    Using,

    // Set operations
    Union,
    Intersect,
    Except,

    // Data manipulation
    Insert,
    Values,
    Update,
    Set,
    Delete,
    Default,
    With,
    Recursive,

    // Data definition
    Create,
    Drop,
    Alter,
    Table,
    Index,
    View,
    Materialized,
    Database,
    Schema,
    Trigger,
    Procedure,
    Function,
    Replace,
    Temporary,
    Temp,
    If,
    Exists,
    Cascade,
    Restrict,
    Add,
    Column,
    Modify,
    Change,
    Rename,
    To,
    Type,
    Clustered,
    Nonclustered,
    Include,

    // Constraints
    Primary,
    Key,
    Foreign,
    References,
    Unique,
    Check,
    Constraint,
    Collate,
    AutoIncrement,
    Autoincrement,
    Identity,
    Generated,
    Always,
    Action,
    No,
    Option,
    Cascaded,
    Local,

    // Triggers
    Before,
    After,
    Instead,
    Of,
    For,
    Each,
    Statement,

    // Routines
    In,
    Out,
    Inout,
    Variadic,
    Returns,
    Return,
    Language,
    Security,
    Definer,
    Invoker,
    Deterministic,
    Contains,
    Sql,
    Reads,
    Modifies,
    Data,
    Comment,
    Immutable,
    Stable,
    Volatile,
    Begin,
    End,
    Declare,
    Cursor,
    Handler,
    Continue,
    Exit,
    Undo,
    Sqlexception,
    Sqlwarning,
    Found,
    Sqlstate,
    Constant,

    // Control flow
    Else,
    Elseif,
    Elsif,
    Endif,
    Then,
    While,
    Do,
    Loop,
    Repeat,
    Until,
    Reverse,
    Case,
    When,
    Leave,
    Iterate,
    Break,
    Open,
    Close,
    Deallocate,
    Prior,
    Absolute,
    Relative,
    Call,
    Exec,
    Execute,

    // Error handling
    Try,
    Catch,
    Raise,
    Raiserror,
    Throw,
    Signal,
    Resignal,
    Exception,
    Others,

    // Transactions
    Transaction,
    Tran,
    Work,
    Commit,
    Rollback,
    Savepoint,
    Save,
    Release,
    Start,
    Deferred,
    Immediate,
    Exclusive,

    // Explain
    Explain,
    Analyze,
    Extended,
    Format,
    Query,
    Plan,
    Verbose,

    // Windows
    Over,
    Partition,
    Range,
    Unbounded,
    Preceding,
    Following,
    Current,

    // Operators and literals
    And,
    Or,
    Not,
    Is,
    Like,
    Between,
    Null,
    True,
    False,
    Cast,
}

impl Keyword {
    /// Looks up a keyword from its text, ignoring case.
    #[must_use]
    #[allow(clippy::should_implement_trait, clippy::too_many_lines)]
    pub fn from_str(s: &str) -> Option<Self> {
        let upper = s.to_ascii_uppercase();
        match upper.as_str() {
            "SELECT" => Some(Self::Select),
            "FROM" => Some(Self::From),
            "WHERE" => Some(Self::Where),
            "ORDER" => Some(Self::Order),
            "BY" => Some(Self::By),
            "GROUP" => Some(Self::Group),
            "HAVING" => Some(Self::Having),
            "LIMIT" => Some(Self::Limit),
            "OFFSET" => Some(Self::Offset),
            "DISTINCT" => Some(Self::Distinct),
            "ALL" => Some(Self::All),
            "AS" => Some(Self::As),
            "TOP" => Some(Self::Top),
            "PERCENT" => Some(Self::Percent),
            "TIES" => Some(Self::Ties),
            "FETCH" => Some(Self::Fetch),
            "FIRST" => Some(Self::First),
            "NEXT" => Some(Self::Next),
            "ROWS" => Some(Self::Rows),
            "ROW" => Some(Self::Row),
            "ONLY" => Some(Self::Only),
            "ASC" => Some(Self::Asc),
            "DESC" => Some(Self::Desc),
            "NULLS" => Some(Self::Nulls),
            "LAST" => Some(Self::Last),
            "INTO" => Some(Self::Into),
            "JOIN" => Some(Self::Join),
            "INNER" => Some(Self::Inner),
            "LEFT" => Some(Self::Left),
            "RIGHT" => Some(Self::Right),
            "FULL" => Some(Self::Full),
            "OUTER" => Some(Self::Outer),
            "CROSS" => Some(Self::Cross),
            "ON" => Some(Self::On),
            "USING" => Some(Self::Using),
            "UNION" => Some(Self::Union),
            "INTERSECT" => Some(Self::Intersect),
            "EXCEPT" => Some(Self::Except),
            "INSERT" => Some(Self::Insert),
            "VALUES" => Some(Self::Values),
            "UPDATE" => Some(Self::Update),
            "SET" => Some(Self::Set),
            "DELETE" => Some(Self::Delete),
            "DEFAULT" => Some(Self::Default),
            "WITH" => Some(Self::With),
            "RECURSIVE" => Some(Self::Recursive),
            "CREATE" => Some(Self::Create),
            "DROP" => Some(Self::Drop),
            "ALTER" => Some(Self::Alter),
            "TABLE" => Some(Self::Table),
            "INDEX" => Some(Self::Index),
            "VIEW" => Some(Self::View),
            "MATERIALIZED" => Some(Self::Materialized),
            "DATABASE" => Some(Self::Database),
            "SCHEMA" => Some(Self::Schema),
            "TRIGGER" => Some(Self::Trigger),
            "PROCEDURE" => Some(Self::Procedure),
            "FUNCTION" => Some(Self::Function),
            "REPLACE" => Some(Self::Replace),
            "TEMPORARY" => Some(Self::Temporary),
            "TEMP" => Some(Self::Temp),
            "IF" => Some(Self::If),
            "EXISTS" => Some(Self::Exists),
            "CASCADE" => Some(Self::Cascade),
            "RESTRICT" => Some(Self::Restrict),
            "ADD" => Some(Self::Add),
            "COLUMN" => Some(Self::Column),
            "MODIFY" => Some(Self::Modify),
            "CHANGE" => Some(Self::Change),
            "RENAME" => Some(Self::Rename),
            "TO" => Some(Self::To),
            "TYPE" => Some(Self::Type),
            "CLUSTERED" => Some(Self::Clustered),
            "NONCLUSTERED" => Some(Self::Nonclustered),
            "INCLUDE" => Some(Self::Include),
            "PRIMARY" => Some(Self::Primary),
            "KEY" => Some(Self::Key),
            "FOREIGN" => Some(Self::Foreign),
            "REFERENCES" => Some(Self::References),
            "UNIQUE" => Some(Self::Unique),
            "CHECK" => Some(Self::Check),
            "CONSTRAINT" => Some(Self::Constraint),
            "COLLATE" => Some(Self::Collate),
            "AUTO_INCREMENT" => Some(Self::AutoIncrement),
            "AUTOINCREMENT" => Some(Self::Autoincrement),
            "IDENTITY" => Some(Self::Identity),
            "GENERATED" => Some(Self::Generated),
            "ALWAYS" => Some(Self::Always),
            "ACTION" => Some(Self::Action),
            "NO" => Some(Self::No),
            "OPTION" => Some(Self::Option),
            "CASCADED" => Some(Self::Cascaded),
            "LOCAL" => Some(Self::Local),
            "BEFORE" => Some(Self::Before),
            "AFTER" => Some(Self::After),
            "INSTEAD" => Some(Self::Instead),
            "OF" => Some(Self::Of),
            "FOR" => Some(Self::For),
            "EACH" => Some(Self::Each),
            "STATEMENT" => Some(Self::Statement),
            "IN" => Some(Self::In),
            "OUT" => Some(Self::Out),
            "INOUT" => Some(Self::Inout),
            "VARIADIC" => Some(Self::Variadic),
            "RETURNS" => Some(Self::Returns),
            "RETURN" => Some(Self::Return),
            "LANGUAGE" => Some(Self::Language),
            "SECURITY" => Some(Self::Security),
            "DEFINER" => Some(Self::Definer),
            "INVOKER" => Some(Self::Invoker),
            "DETERMINISTIC" => Some(Self::Deterministic),
            "CONTAINS" => Some(Self::Contains),
            "SQL" => Some(Self::Sql),
            "READS" => Some(Self::Reads),
            "MODIFIES" => Some(Self::Modifies),
            "DATA" => Some(Self::Data),
            "COMMENT" => Some(Self::Comment),
            "IMMUTABLE" => Some(Self::Immutable),
            "STABLE" => Some(Self::Stable),
            "VOLATILE" => Some(Self::Volatile),
            "BEGIN" => Some(Self::Begin),
            "END" => Some(Self::End),
            "DECLARE" => Some(Self::Declare),
            "CURSOR" => Some(Self::Cursor),
            "HANDLER" => Some(Self::Handler),
            "CONTINUE" => Some(Self::Continue),
            "EXIT" => Some(Self::Exit),
            "UNDO" => Some(Self::Undo),
            "SQLEXCEPTION" => Some(Self::Sqlexception),
            "SQLWARNING" => Some(Self::Sqlwarning),
            "FOUND" => Some(Self::Found),
            "SQLSTATE" => Some(Self::Sqlstate),
            "CONSTANT" => Some(Self::Constant),
            "ELSE" => Some(Self::Else),
            "ELSEIF" => Some(Self::Elseif),
            "ELSIF" => Some(Self::Elsif),
            "ENDIF" => Some(Self::Endif),
            "THEN" => Some(Self::Then),
            "WHILE" => Some(Self::While),
            "DO" => Some(Self::Do),
            "LOOP" => Some(Self::Loop),
            "REPEAT" => Some(Self::Repeat),
            "UNTIL" => Some(Self::Until),
            "REVERSE" => Some(Self::Reverse),
            "CASE" => Some(Self::Case),
            "WHEN" => Some(Self::When),
            "LEAVE" => Some(Self::Leave),
            "ITERATE" => Some(Self::Iterate),
            "BREAK" => Some(Self::Break),
            "OPEN" => Some(Self::Open),
            "CLOSE" => Some(Self::Close),
            "DEALLOCATE" => Some(Self::Deallocate),
            "PRIOR" => Some(Self::Prior),
            "ABSOLUTE" => Some(Self::Absolute),
            "RELATIVE" => Some(Self::Relative),
            "CALL" => Some(Self::Call),
            "EXEC" => Some(Self::Exec),
            "EXECUTE" => Some(Self::Execute),
            "TRY" => Some(Self::Try),
            "CATCH" => Some(Self::Catch),
            "RAISE" => Some(Self::Raise),
            "RAISERROR" => Some(Self::Raiserror),
            "THROW" => Some(Self::Throw),
            "SIGNAL" => Some(Self::Signal),
            "RESIGNAL" => Some(Self::Resignal),
            "EXCEPTION" => Some(Self::Exception),
            "OTHERS" => Some(Self::Others),
            "TRANSACTION" => Some(Self::Transaction),
            "TRAN" => Some(Self::Tran),
            "WORK" => Some(Self::Work),
            "COMMIT" => Some(Self::Commit),
            "ROLLBACK" => Some(Self::Rollback),
            "SAVEPOINT" => Some(Self::Savepoint),
            "SAVE" => Some(Self::Save),
            "RELEASE" => Some(Self::Release),
            "START" => Some(Self::Start),
            "DEFERRED" => Some(Self::Deferred),
            "IMMEDIATE" => Some(Self::Immediate),
            "EXCLUSIVE" => Some(Self::Exclusive),
            "EXPLAIN" => Some(Self::Explain),
            "ANALYZE" => Some(Self::Analyze),
            "EXTENDED" => Some(Self::Extended),
            "FORMAT" => Some(Self::Format),
            "QUERY" => Some(Self::Query),
            "PLAN" => Some(Self::Plan),
            "VERBOSE" => Some(Self::Verbose),
            "OVER" => Some(Self::Over),
            "PARTITION" => Some(Self::Partition),
            "RANGE" => Some(Self::Range),
            "UNBOUNDED" => Some(Self::Unbounded),
            "PRECEDING" => Some(Self::Preceding),
            "FOLLOWING" => Some(Self::Following),
            "CURRENT" => Some(Self::Current),
            "AND" => Some(Self::And),
            "OR" => Some(Self::Or),
            "NOT" => Some(Self::Not),
            "IS" => Some(Self::Is),
            "LIKE" => Some(Self::Like),
            "BETWEEN" => Some(Self::Between),
            "NULL" => Some(Self::Null),
            "TRUE" => Some(Self::True),
            "FALSE" => Some(Self::False),
            "CAST" => Some(Self::Cast),
            _ => None,
        }
    }

    /// Returns the canonical uppercase spelling.
    #[must_use]
    #[allow(clippy::too_many_lines)]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Select => "SELECT",
            Self::From => "FROM",
            Self::Where => "WHERE",
            Self::Order => "ORDER",
            Self::By => "BY",
            Self::Group => "GROUP",
            Self::Having => "HAVING",
            Self::Limit => "LIMIT",
            Self::Offset => "OFFSET",
            Self::Distinct => "DISTINCT",
            Self::All => "ALL",
            Self::As => "AS",
            Self::Top => "TOP",
            Self::Percent => "PERCENT",
            Self::Ties => "TIES",
            Self::Fetch => "FETCH",
            Self::First => "FIRST",
            Self::Next => "NEXT",
            Self::Rows => "ROWS",
            Self::Row => "ROW",
            Self::Only => "ONLY",
            Self::Asc => "ASC",
            Self::Desc => "DESC",
            Self::Nulls => "NULLS",
            Self::Last => "LAST",
            Self::Into => "INTO",
            Self::Join => "JOIN",
            Self::Inner => "INNER",
            Self::Left => "LEFT",
            Self::Right => "RIGHT",
            Self::Full => "FULL",
            Self::Outer => "OUTER",
            Self::Cross => "CROSS",
            Self::On => "ON",
            Self::Using => "USING",
            Self::Union => "UNION",
            Self::Intersect => "INTERSECT",
            Self::Except => "EXCEPT",
            Self::Insert => "INSERT",
            Self::Values => "VALUES",
            Self::Update => "UPDATE",
            Self::Set => "SET",
            Self::Delete => "DELETE",
            Self::Default => "DEFAULT",
            Self::With => "WITH",
            Self::Recursive => "RECURSIVE",
            Self::Create => "CREATE",
            Self::Drop => "DROP",
            Self::Alter => "ALTER",
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::View => "VIEW",
            Self::Materialized => "MATERIALIZED",
            Self::Database => "DATABASE",
            Self::Schema => "SCHEMA",
            Self::Trigger => "TRIGGER",
            Self::Procedure => "PROCEDURE",
            Self::Function => "FUNCTION",
            Self::Replace => "REPLACE",
            Self::Temporary => "TEMPORARY",
            Self::Temp => "TEMP",
            Self::If => "IF",
            Self::Exists => "EXISTS",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::Add => "ADD",
            Self::Column => "COLUMN",
            Self::Modify => "MODIFY",
            Self::Change => "CHANGE",
            Self::Rename => "RENAME",
            Self::To => "TO",
            Self::Type => "TYPE",
            Self::Clustered => "CLUSTERED",
            Self::Nonclustered => "NONCLUSTERED",
            Self::Include => "INCLUDE",
            Self::Primary => "PRIMARY",
            Self::Key => "KEY",
            Self::Foreign => "FOREIGN",
            Self::References => "REFERENCES",
            Self::Unique => "UNIQUE",
            Self::Check => "CHECK",
            Self::Constraint => "CONSTRAINT",
            Self::Collate => "COLLATE",
            Self::AutoIncrement => "AUTO_INCREMENT",
            Self::Autoincrement => "AUTOINCREMENT",
            Self::Identity => "IDENTITY",
            Self::Generated => "GENERATED",
            Self::Always => "ALWAYS",
            Self::Action => "ACTION",
            Self::No => "NO",
            Self::Option => "OPTION",
            Self::Cascaded => "CASCADED",
            Self::Local => "LOCAL",
            Self::Before => "BEFORE",
            Self::After => "AFTER",
            Self::Instead => "INSTEAD",
            Self::Of => "OF",
            Self::For => "FOR",
            Self::Each => "EACH",
            Self::Statement => "STATEMENT",
            Self::In => "IN",
            Self::Out => "OUT",
            Self::Inout => "INOUT",
            Self::Variadic => "VARIADIC",
            Self::Returns => "RETURNS",
            Self::Return => "RETURN",
            Self::Language => "LANGUAGE",
            Self::Security => "SECURITY",
            Self::Definer => "DEFINER",
            Self::Invoker => "INVOKER",
            Self::Deterministic => "DETERMINISTIC",
            Self::Contains => "CONTAINS",
            Self::Sql => "SQL",
            Self::Reads => "READS",
            Self::Modifies => "MODIFIES",
            Self::Data => "DATA",
            Self::Comment => "COMMENT",
            Self::Immutable => "IMMUTABLE",
            Self::Stable => "STABLE",
            Self::Volatile => "VOLATILE",
            Self::Begin => "BEGIN",
            Self::End => "END",
            Self::Declare => "DECLARE",
            Self::Cursor => "CURSOR",
            Self::Handler => "HANDLER",
            Self::Continue => "CONTINUE",
            Self::Exit => "EXIT",
            Self::Undo => "UNDO",
            Self::Sqlexception => "SQLEXCEPTION",
            Self::Sqlwarning => "SQLWARNING",
            Self::Found => "FOUND",
            Self::Sqlstate => "SQLSTATE",
            Self::Constant => "CONSTANT",
            Self::Else => "ELSE",
            Self::Elseif => "ELSEIF",
            Self::Elsif => "ELSIF",
            Self::Endif => "ENDIF",
            Self::Then => "THEN",
            Self::While => "WHILE",
            Self::Do => "DO",
            Self::Loop => "LOOP",
            Self::Repeat => "REPEAT",
            Self::Until => "UNTIL",
            Self::Reverse => "REVERSE",
            Self::Case => "CASE",
            Self::When => "WHEN",
            Self::Leave => "LEAVE",
            Self::Iterate => "ITERATE",
            Self::Break => "BREAK",
            Self::Open => "OPEN",
            Self::Close => "CLOSE",
            Self::Deallocate => "DEALLOCATE",
            Self::Prior => "PRIOR",
            Self::Absolute => "ABSOLUTE",
            Self::Relative => "RELATIVE",
            Self::Call => "CALL",
            Self::Exec => "EXEC",
            Self::Execute => "EXECUTE",
            Self::Try => "TRY",
            Self::Catch => "CATCH",
            Self::Raise => "RAISE",
            Self::Raiserror => "RAISERROR",
            Self::Throw => "THROW",
            Self::Signal => "SIGNAL",
            Self::Resignal => "RESIGNAL",
            Self::Exception => "EXCEPTION",
            Self::Others => "OTHERS",
            Self::Transaction => "TRANSACTION",
            Self::Tran => "TRAN",
            Self::Work => "WORK",
            Self::Commit => "COMMIT",
            Self::Rollback => "ROLLBACK",
            Self::Savepoint => "SAVEPOINT",
            Self::Save => "SAVE",
            Self::Release => "RELEASE",
            Self::Start => "START",
            Self::Deferred => "DEFERRED",
            Self::Immediate => "IMMEDIATE",
            Self::Exclusive => "EXCLUSIVE",
            Self::Explain => "EXPLAIN",
            Self::Analyze => "ANALYZE",
            Self::Extended => "EXTENDED",
            Self::Format => "FORMAT",
            Self::Query => "QUERY",
            Self::Plan => "PLAN",
            Self::Verbose => "VERBOSE",
            Self::Over => "OVER",
            Self::Partition => "PARTITION",
            Self::Range => "RANGE",
            Self::Unbounded => "UNBOUNDED",
            Self::Preceding => "PRECEDING",
            Self::Following => "FOLLOWING",
            Self::Current => "CURRENT",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Not => "NOT",
            Self::Is => "IS",
            Self::Like => "LIKE",
            Self::Between => "BETWEEN",
            Self::Null => "NULL",
            Self::True => "TRUE",
            Self::False => "FALSE",
            Self::Cast => "CAST",
        }
    }

    /// Returns true if the keyword can never be used as a bare identifier.
    #[must_use]
    pub const fn is_reserved(&self) -> bool {
        matches!(
            self,
            Self::Select | Self::From | Self::Where | Self::Order | Self::By | Self::Group
                | Self::Having | Self::Limit | Self::Offset | Self::Distinct | Self::All
                | Self::As | Self::Top | Self::Fetch | Self::Into | Self::Join | Self::Inner
                | Self::Left | Self::Right | Self::Full | Self::Outer | Self::Cross | Self::On
                | Self::Using | Self::Union | Self::Intersect | Self::Except | Self::Insert
                | Self::Values | Self::Update | Self::Set | Self::Delete | Self::Default
                | Self::With | Self::Create | Self::Drop | Self::Alter | Self::Table
                | Self::Index | Self::View | Self::If | Self::Exists | Self::Primary
                | Self::Foreign | Self::References | Self::Unique | Self::Check
                | Self::Constraint | Self::Collate | Self::For | Self::In | Self::Return
                | Self::Begin | Self::End | Self::Declare | Self::Continue | Self::Exit
                | Self::Else | Self::Elseif | Self::Elsif | Self::Endif | Self::Then
                | Self::While | Self::Loop | Self::Repeat | Self::Until | Self::Case
                | Self::When | Self::Leave | Self::Iterate | Self::Break | Self::Open
                | Self::Close | Self::Deallocate | Self::Call | Self::Exec | Self::Execute
                | Self::Try | Self::Catch | Self::Raise | Self::Raiserror | Self::Throw
                | Self::Signal | Self::Resignal | Self::Exception | Self::Commit
                | Self::Rollback | Self::Savepoint | Self::Save | Self::Release | Self::Start
                | Self::Explain | Self::Over | Self::And | Self::Or | Self::Not | Self::Is
                | Self::Like | Self::Between | Self::Null | Self::True | Self::False
                | Self::Cast
        )
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token kinds.
///
/// Kinds carry no payload; the source text of every token lives in
/// [`Token::literal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// End of input.
    Eof,
    /// A byte sequence the lexer could not recognize.
    Illegal,

    // Identifiers, keywords and literals
    /// Bare identifier (e.g., `users`, `@id`, `#tmp`).
    Identifier,
    /// Identifier in dialect quotes (e.g., `"order"`, `` `order` ``, `[order]`).
    QuotedIdentifier,
    /// SQL keyword.
    Keyword(Keyword),
    /// String literal (e.g., `'hello'`).
    String,
    /// Numeric literal, integer or fractional.
    Number,
    /// Dollar-quoted body (e.g., `$$ ... $$`).
    DollarQuote,

    // Operators
    /// `=`
    Assign,
    /// `==`
    Eq,
    /// `!=` or `<>`
    NotEq,
    /// `<`
    Lt,
    /// `>`
    Gt,
    /// `<=`
    LtEq,
    /// `>=`
    GtEq,
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `||`
    Concat,

    // Punctuation
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
    /// `[` where it does not open a quoted identifier.
    LeftBracket,
    /// `]`
    RightBracket,
    /// `,`
    Comma,
    /// `;`
    Semicolon,
    /// `.`
    Dot,
    /// `..`
    DotDot,
    /// `:`
    Colon,
    /// `::`
    DoubleColon,
    /// `:=`
    ColonAssign,
}

impl TokenKind {
    /// Returns a short human-readable description, used in error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Eof => "end of input",
            Self::Illegal => "illegal token",
            Self::Identifier | Self::QuotedIdentifier => "identifier",
            Self::Keyword(kw) => kw.as_str(),
            Self::String => "string",
            Self::Number => "number",
            Self::DollarQuote => "dollar-quoted string",
            Self::Assign => "=",
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Lt => "<",
            Self::Gt => ">",
            Self::LtEq => "<=",
            Self::GtEq => ">=",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Star => "*",
            Self::Slash => "/",
            Self::Percent => "%",
            Self::Concat => "||",
            Self::LeftParen => "(",
            Self::RightParen => ")",
            Self::LeftBracket => "[",
            Self::RightBracket => "]",
            Self::Comma => ",",
            Self::Semicolon => ";",
            Self::Dot => ".",
            Self::DotDot => "..",
            Self::Colon => ":",
            Self::DoubleColon => "::",
            Self::ColonAssign => ":=",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.describe())
    }
}

/// A token with its literal text and location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// The kind of token.
    pub kind: TokenKind,
    /// Literal text. Strings and quoted identifiers hold their unquoted value;
    /// illegal tokens hold a description of the problem.
    pub literal: String,
    /// The location in the source code.
    pub span: Span,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(kind: TokenKind, literal: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            literal: literal.into(),
            span,
        }
    }

    /// Returns true if this is an EOF token.
    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    /// Returns true if this is a keyword.
    #[must_use]
    pub const fn is_keyword(&self) -> bool {
        matches!(self.kind, TokenKind::Keyword(_))
    }

    /// Returns the keyword if this is a keyword token.
    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        match &self.kind {
            TokenKind::Keyword(kw) => Some(*kw),
            _ => None,
        }
    }

    /// Describes the token for error messages (e.g., `identifier "foo"`).
    #[must_use]
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => String::from("end of input"),
            TokenKind::Keyword(kw) => kw.as_str().to_string(),
            TokenKind::Identifier | TokenKind::QuotedIdentifier => {
                format!("identifier \"{}\"", self.literal)
            }
            TokenKind::String => format!("string '{}'", self.literal),
            TokenKind::Number => format!("number {}", self.literal),
            TokenKind::Illegal => format!("illegal token ({})", self.literal),
            kind => kind.describe().to_string(),
        }
    }
}
