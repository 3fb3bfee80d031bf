use std::error::Error;
use std::fs;
use std::path::PathBuf;

use log::{info, initialize_logger};
use structopt::StructOpt;

use ficha::document::{self, Variant};
use ficha::record::InterviewRecord;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "render-ficha",
    about = "Render a stored interview record as a document"
)]
struct Opt {
    /// The output variant (txt or html)
    #[structopt(parse(try_from_str))]
    variant: Variant,

    /// The path of a JSON file holding the record fields
    #[structopt(parse(from_os_str))]
    input: PathBuf,
}

fn main() -> Result<(), Box<dyn Error>> {
    let opt = Opt::from_args();

    let logger = initialize_logger();

    info!(logger, "Reading record..."; "path" => %opt.input.display());
    let raw = fs::read_to_string(&opt.input)?;
    let record: InterviewRecord = serde_json::from_str(&raw)?;

    info!(logger, "Rendering document..."; "variant" => opt.variant.extension());
    let document = document::render(&record, opt.variant)?;

    println!("{}", document);

    Ok(())
}
