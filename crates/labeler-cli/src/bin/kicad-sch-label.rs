//! Entry point for the schematic labeling tool.

fn main() {
    std::process::exit(labeler_cli::schematic::main());
}
