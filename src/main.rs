use std::{
    fs,
    io::{self, Read},
    process,
};

use clap::{App, Arg, ArgMatches};

use astviz::dump::{assembler::Assembler, parser::RecordParser};
use astviz::visualize::{render_text, Visualizer};

fn main() {
    let matches = App::new("astviz")
        .version("1.0.0")
        .about(
            "Renders a textual AST dump as an indented tree and, optionally, as a \
            Graphviz image.",
        )
        .arg(
            Arg::new("input")
                .value_name("FILE")
                .index(1)
                .help("Path to the AST dump file."),
        )
        .arg(
            Arg::new("image")
                .value_name("IMAGE")
                .index(2)
                .help(
                    "Path of the image rendered with Graphviz, e.g. ast.png. The format \
                    is taken from the file extension.",
                ),
        )
        .get_matches();

    if matches.value_of("input").is_none() {
        println!("USAGE:\n    astviz <FILE> [IMAGE]");
        println!("Example: astviz ast_dump.txt ast_tree.png");
        process::exit(1);
    }
    Runner::new(&matches)
        .run()
        .unwrap_or_else(|err| eprintln!("{}: {}", err, matches.value_of("input").unwrap()));
}

/// Simple struct responsible for coordinating one run: load the dump, rebuild
/// the tree, print it and optionally hand it to Graphviz.
struct Runner<'a> {
    args: &'a ArgMatches,
}

impl<'a> Runner<'a> {
    fn new(args: &'a ArgMatches) -> Self {
        Self { args }
    }

    fn run(&self) -> Result<(), io::Error> {
        let src = self.load_dump_file()?;
        let records = RecordParser::new(&src).parse();
        let tree = match Assembler::new().assemble(records) {
            Ok(tree) => tree,
            // A dump that never mentions the root id is reported once and
            // nothing gets rendered. Not a process failure.
            Err(err) => {
                eprintln!("{}", err);
                return Ok(());
            }
        };

        println!("Text Representation:");
        println!("====================");
        print!("{}", render_text(&tree));

        if let Some(outfile) = self.args.value_of("image") {
            let mut viz = Visualizer::new("ast", true);
            viz.visualize_tree(&tree);
            match viz.write_to_image(outfile) {
                Ok(()) => println!("\nVisualization saved to {}", outfile),
                // The text rendering above stays valid; the export step is
                // the only thing that failed.
                Err(err) => {
                    eprintln!("\n{}", err);
                    eprintln!(
                        "Make sure you have Graphviz installed (https://graphviz.org/download/)"
                    );
                }
            }
        }
        Ok(())
    }

    /// Helper function for getting the content of the dump file.
    fn load_dump_file(&self) -> Result<String, io::Error> {
        let path = self.args.value_of("input").unwrap();
        let mut file = fs::File::open(path)?;
        let mut src = String::new();
        file.read_to_string(&mut src)?;
        Ok(src)
    }
}
