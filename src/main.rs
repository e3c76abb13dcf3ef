//! # Centra CLI
//!
//! Command-line interface for the centra betweenness centrality toolkit:
//!
//! ```text
//! centra convert edges.txt graph.bin        # edge list -> snapshot
//! centra exact graph.bin results.json      # Brandes' exact algorithm
//! centra sample 0.1 0.1 graph.bin out.json --estimator vc
//! centra diameter graph.bin --approximate
//! centra experiment 20 graph.bin out.json --estimator brandes-pich \
//!     --epsilon 0.1 --delta 0.1
//! ```

use clap::Parser;
use log::error;

mod cli;

fn main() {
    let parsed = cli::Cli::parse();
    centra_common::logging::init(parsed.verbose);

    if let Err(e) = cli::run(parsed) {
        error!("{e:#}");
        std::process::exit(1);
    }
}
