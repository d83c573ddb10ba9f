/// How one built command is handed to the OS.
///
/// # Examples
///
/// ```
/// use rulerunner::execution::Invocation;
///
/// let argv = vec!["echo".to_string(), "hi".to_string()];
///
/// let direct = Invocation::new(&argv, false);
/// assert_eq!(direct.program(), "echo");
/// assert_eq!(direct.args(), ["hi"]);
///
/// let shell = Invocation::new(&argv, true);
/// assert_eq!(shell.program(), "bash");
/// assert_eq!(shell.args(), ["-c", "echo hi"]);
/// assert_eq!(shell.display(), "echo hi");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
    display: String,
}

/// Shell used when commands run in shell mode.
const SHELL: &str = "bash";

impl Invocation {
    /// Build an invocation from an argument list.
    ///
    /// In shell mode the arguments are joined with single spaces and passed
    /// to `bash -c`; otherwise the first argument is the program.
    #[must_use]
    pub fn new(argv: &[String], use_bash: bool) -> Self {
        let display = argv.join(" ");
        if use_bash {
            Self {
                program: SHELL.to_string(),
                args: vec!["-c".to_string(), display.clone()],
                display,
            }
        } else {
            let (program, args) = argv
                .split_first()
                .map_or_else(|| (String::new(), Vec::new()), |(p, a)| (p.clone(), a.to_vec()));
            Self {
                program,
                args,
                display,
            }
        }
    }

    /// Executable to launch.
    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    /// Arguments passed to the executable.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// The fully resolved command line, as shown to the user.
    #[must_use]
    pub fn display(&self) -> &str {
        &self.display
    }
}
