use chartmaker::plot::parse_cli;
use chartmaker::{run, Outcome, Prompter, SvgRenderer};

fn main() {
    let (svgout, level) = parse_cli();
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let stdin = std::io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), std::io::stdout());
    let mut renderer = SvgRenderer::new(svgout);
    match run(&mut prompter, &mut renderer) {
        Ok(Outcome::Rendered) => println!("chart saved to {}", renderer.path().display()),
        Ok(Outcome::Rejected(_)) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
