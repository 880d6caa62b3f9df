//! `ember mirror` — preview mirror rewriting for a URL.

use ember_config::load_config_or_default;
use ember_net::{MirrorTable, NetError, Url};
use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::GlobalArgs;

/// Runs the `ember mirror` command with the mirrors from `ember.toml`.
pub fn run(
    url: &str,
    seed: Option<u64>,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let config = load_config_or_default(&global.project_dir()?)?;
    let rewritten = rewrite(&config.mirror_table(), url, seed)?;
    println!("{rewritten}");
    Ok(0)
}

/// Rewrites `url`, seeding the mirror choice when `seed` is given.
pub fn rewrite(table: &MirrorTable, url: &str, seed: Option<u64>) -> Result<Url, NetError> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    table.rewrite_str(url, &mut rng)
}
