use std::path::Path;

/// Mean hours per week for each task, before per-teacher scaling.
const TASKS: [(&str, f64); 4] = [
    ("grading", 6.5),
    ("planning", 5.0),
    ("meetings", 2.5),
    ("admin", 3.0),
];

const TEACHERS: usize = 8;
const WEEKS: usize = 4;

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
}

fn main() -> anyhow::Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = Path::new("teacher_workload_cleaned.csv");
    let mut writer = csv::Writer::from_path(output_path)?;
    writer.write_record(["Teacher_ID", "Task", "Hours_Spent", "Class_Size"])?;

    let mut rows = 0;
    for teacher in 1..=TEACHERS {
        let teacher_id = format!("T{teacher:02}");
        let class_size = rng.range(20.0, 50.0).round() as u32;
        let load = rng.range(0.7, 1.3);

        for _week in 0..WEEKS {
            for (task, base) in TASKS {
                // Grading grows with class size.
                let mut hours = base * load * rng.range(0.8, 1.2);
                if task == "grading" {
                    hours += (class_size as f64 - 30.0) * 0.08;
                }
                let hours = (hours.max(0.25) * 4.0).round() / 4.0;

                writer.write_record([
                    teacher_id.clone(),
                    task.to_string(),
                    format!("{hours:.2}"),
                    class_size.to_string(),
                ])?;
                rows += 1;
            }
        }
    }
    writer.flush()?;

    println!(
        "Wrote {rows} workload rows for {TEACHERS} teachers to {}",
        output_path.display()
    );
    Ok(())
}
