use qif_parser::{normalize_splits, parse};

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let filename = std::env::args().nth(1).ok_or("filename argument")?;
    let unparsed_file = std::fs::read_to_string(filename)?;

    let mut doc = parse(&unparsed_file)?;
    doc.transactions = normalize_splits(doc.transactions);
    doc.memorized = normalize_splits(doc.memorized);
    eprintln!("{} records", doc.record_count());
    dbg!(doc);
    Ok(())
}

fn main() {
    if let Err(e) = run() {
        println!("Error: {}", e);
    }
}
