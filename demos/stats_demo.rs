use clap::Parser;
use symtab_hash::LinearProbingTable;
use symtab_hash::SeparateChainingTable;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'k', long = "keys", default_value_t = 100_000)]
    keys: usize,
}

fn main() {
    let args = Args::parse();

    println!("Filling both tables with {} sequential u64 keys...", args.keys);

    let mut probing: LinearProbingTable<u64, u64> = LinearProbingTable::new();
    let mut chaining: SeparateChainingTable<u64, u64> = SeparateChainingTable::new();

    for id in 0..args.keys as u64 {
        probing.insert(id, id);
        chaining.insert(id, id);
    }

    println!();
    probing.probe_stats().print();
    println!();
    chaining.chain_stats().print();

    let retained = args.keys / 10;
    for id in retained as u64..args.keys as u64 {
        probing.remove(&id);
        chaining.remove(&id);
    }

    println!();
    println!(
        "After removing all but the first {} keys from each table:",
        retained
    );
    println!();
    probing.probe_stats().print();
    println!();
    chaining.chain_stats().print();
}
