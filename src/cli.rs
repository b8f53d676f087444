use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "jfpad", about = "Terminal playground for the JF language", version)]
pub struct Cli {
    /// Program file to load into the editor (or to run with --exec).
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Run the program and print the result instead of opening the editor.
    #[arg(short = 'x', long)]
    pub exec: bool,
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
