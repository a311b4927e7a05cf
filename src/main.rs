use qmltypes_generator::{generate, Error, GeneratorConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut args = std::env::args();
    args.next().unwrap();
    let config = GeneratorConfig::from_args(args)?;

    match generate(&config) {
        Err(Error::Tool(failure)) => {
            eprintln!("{}", failure);
            let block: Vec<&str> = failure.output.trim().lines().collect();
            eprintln!("Output:\n\t| {}", block.join("\n\t| "));
            std::process::exit(1);
        }
        result => Ok(result?),
    }
}
