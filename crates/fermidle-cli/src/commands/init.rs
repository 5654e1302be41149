//! The `fermidle init` command.

use anyhow::Result;

pub fn execute() -> Result<()> {
    // Create fermidle.toml
    if std::path::Path::new("fermidle.toml").exists() {
        println!("fermidle.toml already exists, skipping.");
    } else {
        std::fs::write("fermidle.toml", SAMPLE_CONFIG)?;
        println!("Created fermidle.toml");
    }

    // Create sample values
    std::fs::create_dir_all("data")?;
    let values_path = std::path::Path::new("data/values.json");
    if values_path.exists() {
        println!("data/values.json already exists, skipping.");
    } else {
        std::fs::write(values_path, SAMPLE_VALUES)?;
        println!("Created data/values.json");
    }

    println!("\nNext steps:");
    println!("  1. Add your own measurements to data/values.json");
    println!("  2. Run: fermidle generate --count 5 --derive");
    println!("  3. Run: fermidle validate --dataset questions.json");
    println!("  4. Set `dataset = \"questions.json\"` in fermidle.toml and play: fermidle daily");

    Ok(())
}

const SAMPLE_CONFIG: &str = r#"# fermidle configuration

# Question dataset. Leave unset to play the bundled questions.
# dataset = "questions.json"

values = "data/values.json"
questions_output = "questions.json"

[hint]
closer_probability = 0.6
base_tolerance = 0.5
tolerance_scale = 0.25
max_tolerance = 2.0
pool_size = 3

[generator]
count = 20
max_tries = 1000000
"#;

const SAMPLE_VALUES: &str = r#"[
  {
    "value": { "value": 330.0, "units": "m" },
    "name": "height of the Eiffel tower",
    "measurement": "length",
    "thing": "Eiffel tower",
    "specifier": "height"
  },
  {
    "value": { "value": 0.0427, "units": "m" },
    "name": "diameter of a golf ball",
    "measurement": "length",
    "thing": "Golf ball",
    "specifier": "diameter"
  },
  {
    "value": { "value": 8849.0, "units": "m" },
    "name": "height of Mount Everest",
    "measurement": "length",
    "thing": "Mount Everest",
    "specifier": "height"
  },
  {
    "value": { "value": 5.972e24, "units": "kg" },
    "name": "mass of the Earth",
    "measurement": "mass",
    "thing": "Earth"
  },
  {
    "value": { "value": 1.083e21, "units": "m^3" },
    "name": "volume of the Earth",
    "measurement": "volume",
    "thing": "Earth"
  },
  {
    "value": { "value": 7.342e22, "units": "kg" },
    "name": "mass of the Moon",
    "measurement": "mass",
    "thing": "Moon"
  },
  {
    "value": { "value": 2.19e19, "units": "m^3" },
    "name": "volume of the Moon",
    "measurement": "volume",
    "thing": "Moon"
  }
]
"#;
