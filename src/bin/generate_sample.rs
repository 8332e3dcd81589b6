use anyhow::{Context, Result};

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

const NAMES: [&str; 10] = [
    "Red Lion",
    "Crown",
    "Royal Oak",
    "White Hart",
    "Swan",
    "Anchor",
    "Kings Arms",
    "Plough",
    "Railway",
    "George",
];

const AUTHORITIES: [&str; 8] = [
    "Camden",
    "Westminster",
    "Hackney",
    "Islington",
    "Manchester",
    "Leeds",
    "Bristol",
    "Newcastle upon Tyne",
];

const POSTCODE_AREAS: [&str; 8] = ["NW1", "SW1A", "E8", "N1", "M1", "LS1", "BS1", "NE1"];

fn main() -> Result<()> {
    env_logger::init();

    let output_path = std::env::args().nth(1).unwrap_or_else(|| "venues.csv".to_string());
    let mut rng = SimpleRng::new(42);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    // Pandas-style layout: unnamed index column first, then the data columns.
    writer.write_record(["", "name", "latitude", "longitude", "local_authority", "postcode"])?;

    let rows = 500;
    for i in 0..rows {
        let name = rng.pick(&NAMES);
        let authority = rng.pick(&AUTHORITIES);
        let area = rng.pick(&POSTCODE_AREAS);
        let postcode = format!(
            "{} {}{}{}",
            area,
            rng.next_u64() % 10,
            rng.pick(&["A", "B", "D", "E"]),
            rng.pick(&["A", "B", "D", "E"])
        );
        // England-ish bounding box.
        let latitude = format!("{:.6}", rng.range(50.0, 55.0));
        let longitude = format!("{:.6}", rng.range(-5.5, 1.5));

        // Sprinkle missing coordinates (never on the first row) so the
        // loader's forward-fill has something to do.
        let (latitude, longitude) = if i > 0 && rng.next_u64() % 37 == 0 {
            (String::new(), String::new())
        } else {
            (latitude, longitude)
        };

        writer.write_record([
            i.to_string().as_str(),
            name,
            latitude.as_str(),
            longitude.as_str(),
            authority,
            postcode.as_str(),
        ])?;
    }
    writer.flush()?;

    log::info!("wrote {rows} venues to {output_path}");
    println!("Wrote {rows} venues to {output_path}");
    Ok(())
}
