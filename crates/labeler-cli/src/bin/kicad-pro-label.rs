//! Entry point for the project labeling tool.

fn main() {
    std::process::exit(labeler_cli::project::main());
}
