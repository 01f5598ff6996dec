use anyhow::{Context, Result};
use record_sieve::data::parse_json_records;
use serde_json::{json, Value};

const CATEGORIES: &[&str] = &["hardware", "software", "service", "Hardware"];
const REGIONS: &[&str] = &["north", "south", "east", "west"];
const STATUSES: &[&str] = &["active", "retired", "pending"];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a>(&mut self, choices: &[&'a str]) -> &'a str {
        choices[(self.next_u64() % choices.len() as u64) as usize]
    }
}

fn generate_record(id: usize, rng: &mut SimpleRng) -> Value {
    let price = (rng.next_f64() * 50_000.0).round() / 100.0;
    // Quotes, commas and nulls in `notes` exercise the CSV escaping.
    let notes = match id % 7 {
        0 => json!(format!("ships as \"{}\"", rng.pick(REGIONS))),
        3 => json!("bulk, discounted"),
        5 => Value::Null,
        _ => json!(""),
    };

    json!({
        "id": id,
        "name": format!("item-{id:04}"),
        "category": rng.pick(CATEGORIES),
        "region": rng.pick(REGIONS),
        "status": rng.pick(STATUSES),
        "price": price,
        "in_stock": rng.next_u64() % 2 == 0,
        "notes": notes,
    })
}

fn main() -> Result<()> {
    env_logger::init();

    let mut rng = SimpleRng::new(42);
    let records: Vec<Value> = (1..=300).map(|id| generate_record(id, &mut rng)).collect();

    let text = serde_json::to_string_pretty(&records).context("serializing records")?;

    // Round-trip through the loader so the file is known to open in the app.
    let dataset = parse_json_records(&text).context("re-reading generated records")?;

    let out_path = "sample_records.json";
    std::fs::write(out_path, &text).with_context(|| format!("writing {out_path}"))?;

    log::info!(
        "Wrote {} records with fields {:?} to {}",
        dataset.len(),
        dataset.field_names(),
        out_path
    );
    println!("{out_path}");
    Ok(())
}
