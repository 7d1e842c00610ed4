use crate::error::{IncludeError, Modifier};

/// Largest argument list include() accepts: the target plus three modifiers
pub const MAX_ARGS: usize = 4;

/// Modifier keywords recognised after the target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    Optional,
    ResultVariable,
    NoPolicyScope,
}

impl Keyword {
    pub fn classify(token: &str) -> Option<Self> {
        match token {
            "OPTIONAL" => Some(Keyword::Optional),
            "RESULT_VARIABLE" => Some(Keyword::ResultVariable),
            "NO_POLICY_SCOPE" => Some(Keyword::NoPolicyScope),
            _ => None,
        }
    }
}

/// Options of one include() call
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IncludeOptions {
    /// File or module named by the first argument
    pub target: String,
    pub optional: bool,
    pub no_policy_scope: bool,
    pub result_variable: Option<String>,
}

impl IncludeOptions {
    /// Parse `include()` arguments
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self, IncludeError> {
        if args.is_empty() || args.len() > MAX_ARGS {
            return Err(IncludeError::ArgumentCount);
        }

        let mut options = IncludeOptions {
            target: args[0].as_ref().to_string(),
            ..Default::default()
        };

        let mut i = 1;
        while i < args.len() {
            let token = args[i].as_ref();
            match Keyword::classify(token) {
                Some(Keyword::Optional) => {
                    if options.optional {
                        return Err(IncludeError::DuplicateModifier {
                            modifier: Modifier::Optional,
                        });
                    }
                    options.optional = true;
                }
                Some(Keyword::ResultVariable) => {
                    if options.result_variable.is_some() {
                        return Err(IncludeError::DuplicateModifier {
                            modifier: Modifier::ResultVariable,
                        });
                    }
                    i += 1;
                    let name = args.get(i).ok_or(IncludeError::MissingValue)?.as_ref();
                    // An empty name requests nothing
                    if !name.is_empty() {
                        options.result_variable = Some(name.to_string());
                    }
                }
                Some(Keyword::NoPolicyScope) => options.no_policy_scope = true,
                // Older releases ignored a second argument other than OPTIONAL
                None if i == 1 => {}
                None => return Err(IncludeError::UnknownArgument(token.to_string())),
            }
            i += 1;
        }

        Ok(options)
    }
}
