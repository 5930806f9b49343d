use clap::Parser;
use rh_set::RobinHoodSet;

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "target_len", default_value_t = 1000)]
    target_len: usize,

    /// Remove every n-th value after filling, to show backward-shift effects.
    #[arg(short = 'n', long = "remove_every")]
    remove_every: Option<usize>,
}

fn main() {
    let args = Args::parse();

    println!("Filling RobinHoodSet with {} u64 values", args.target_len);

    let mut set: RobinHoodSet<u64> = RobinHoodSet::new();
    for value in 0..args.target_len as u64 {
        set.insert(value);
    }

    println!("Inserted {} values into {} slots", set.len(), set.capacity());
    println!(
        "Final load factor: {:.2}%",
        (set.len() as f64 / set.capacity() as f64) * 100.0
    );

    set.probe_histogram().print();
    set.debug_stats().print();

    if let Some(step) = args.remove_every.filter(|&step| step > 0) {
        let removed = (0..args.target_len as u64)
            .step_by(step)
            .filter(|value| set.remove(value))
            .count();
        println!("Removed {removed} values");

        set.probe_histogram().print();
        set.debug_stats().print();
    }
}
