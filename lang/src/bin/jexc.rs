use jex_lang::toolchain;
use jex_lang::toolchain::source::SourceBuffer;

const HELP: &str = "\
    jexc - the jex configuration language compiler

    USAGE:
        jexc [--phase PHASE] [--quiet] FILENAME

    OPTIONS:
        --phase PHASE       Which compilation phase to take the compilation through. PHASE is
                            currently only 'lex'.
        --quiet             If present, all non-error output is suppressed.

    ARGS:
        FILENAME            The path to the jex file to compile, or supply '-' to take input
                            from stdin.
";

#[derive(Debug, Eq, PartialEq)]
enum CompilationPhase {
    Lex,
}

#[derive(Debug, Eq, PartialEq)]
struct JexcArgs {
    phase: Option<CompilationPhase>,
    quiet: bool,
    source_file: std::path::PathBuf,
}

fn main() {
    let args = match parse_args() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Error: {}.", e);
            std::process::exit(1);
        }
    };

    let source = match open_source(&args.source_file) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error opening source file {}: {}", args.source_file.display(), e);
            std::process::exit(1);
        }
    };

    let buffer = match toolchain::lexer::TokenizedBuffer::tokenize(&source) {
        Ok(buffer) => buffer,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if args.phase == Some(CompilationPhase::Lex) && !args.quiet {
        println!("TokenizedBuffer [");
        buffer.print_tokens();
        println!("]");
    }
}

fn open_source(path: &std::path::Path) -> Result<SourceBuffer<'static>, Box<dyn std::error::Error>> {
    if path == std::path::Path::new("-") {
        Ok(SourceBuffer::new_from_stdin()?)
    } else {
        Ok(SourceBuffer::new_from_file(path)?)
    }
}

fn parse_args() -> Result<JexcArgs, pico_args::Error> {
    let mut pargs = pico_args::Arguments::from_env();

    if pargs.contains(["-h", "--help"]) {
        print!("{}", HELP);
        std::process::exit(0);
    }

    let args = JexcArgs {
        phase: pargs.opt_value_from_fn("--phase", parse_phase)?,
        quiet: pargs.contains("--quiet"),
        source_file: pargs.free_from_str()?,
    };

    let remaining = pargs.finish();
    if !remaining.is_empty() {
        eprintln!("Error: unused arguments left: {:?}.", remaining);
        std::process::exit(1);
    }
    Ok(args)
}

fn parse_phase(s: &str) -> Result<CompilationPhase, &'static str> {
    match s {
        "lex" => Ok(CompilationPhase::Lex),
        _ => Err("unrecognized compilation phase."),
    }
}
