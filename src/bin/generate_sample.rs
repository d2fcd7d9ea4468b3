use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic MetaPhlAn 4 profile for trying out metaphlanplot.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Output profile path
    #[arg(default_value = "sample_profile.txt")]
    output: PathBuf,

    /// Seed for the abundance generator
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// Species lineages (phylum → species) the synthetic community is drawn from.
const LINEAGES: &[[&str; 6]] = &[
    ["Firmicutes", "Clostridia", "Clostridiales", "Lachnospiraceae", "Roseburia", "Roseburia_intestinalis"],
    ["Firmicutes", "Clostridia", "Clostridiales", "Lachnospiraceae", "Blautia", "Blautia_obeum"],
    ["Firmicutes", "Clostridia", "Clostridiales", "Ruminococcaceae", "Faecalibacterium", "Faecalibacterium_prausnitzii"],
    ["Firmicutes", "Clostridia", "Clostridiales", "Ruminococcaceae", "Ruminococcus", "Ruminococcus_bromii"],
    ["Firmicutes", "Bacilli", "Lactobacillales", "Streptococcaceae", "Streptococcus", "Streptococcus_salivarius"],
    ["Firmicutes", "Erysipelotrichia", "Erysipelotrichales", "Erysipelotrichaceae", "Holdemanella", "Holdemanella_biformis"],
    ["Bacteroidetes", "Bacteroidia", "Bacteroidales", "Bacteroidaceae", "Bacteroides", "Bacteroides_vulgatus"],
    ["Bacteroidetes", "Bacteroidia", "Bacteroidales", "Bacteroidaceae", "Bacteroides", "Bacteroides_uniformis"],
    ["Bacteroidetes", "Bacteroidia", "Bacteroidales", "Prevotellaceae", "Prevotella", "Prevotella_copri"],
    ["Bacteroidetes", "Bacteroidia", "Bacteroidales", "Rikenellaceae", "Alistipes", "Alistipes_putredinis"],
    ["Actinobacteria", "Actinobacteria", "Bifidobacteriales", "Bifidobacteriaceae", "Bifidobacterium", "Bifidobacterium_longum"],
    ["Actinobacteria", "Coriobacteriia", "Coriobacteriales", "Coriobacteriaceae", "Collinsella", "Collinsella_aerofaciens"],
    ["Proteobacteria", "Gammaproteobacteria", "Enterobacterales", "Enterobacteriaceae", "Escherichia", "Escherichia_coli"],
    ["Verrucomicrobia", "Verrucomicrobiae", "Verrucomicrobiales", "Akkermansiaceae", "Akkermansia", "Akkermansia_muciniphila"],
];

const RANK_PREFIXES: [&str; 6] = ["p__", "c__", "o__", "f__", "g__", "s__"];

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

    /// Log-normal weight so a few species dominate, as in real gut profiles.
    fn weight(&mut self) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        (1.5 * z).exp()
    }
}

fn clade_path(lineage: &[&str; 6], depth: usize) -> String {
    let mut path = String::from("k__Bacteria");
    for (prefix, name) in RANK_PREFIXES.iter().zip(lineage.iter()).take(depth) {
        path.push('|');
        path.push_str(prefix);
        path.push_str(name);
    }
    path
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let weights: Vec<f64> = LINEAGES.iter().map(|_| rng.weight()).collect();
    let total: f64 = weights.iter().sum();

    // Every ancestor carries the summed abundance of its species; a parent
    // path sorts before its children, so the map is already in tree order.
    let mut clades: BTreeMap<String, f64> = BTreeMap::new();
    for (lineage, weight) in LINEAGES.iter().zip(&weights) {
        let abundance = weight / total * 100.0;
        for depth in 0..=RANK_PREFIXES.len() {
            *clades.entry(clade_path(lineage, depth)).or_default() += abundance;
        }
    }

    let file = File::create(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let mut out = BufWriter::new(file);
    writeln!(out, "#mpa_vJan21_CHOCOPhlAnSGB_202103")?;
    writeln!(out, "#synthetic profile written by generate_sample")?;
    writeln!(out, "#SampleID\tSynthetic_Gut")?;
    writeln!(out, "#clade_name\tNCBI_tax_id\trelative_abundance\tadditional_species")?;
    for (clade, abundance) in &clades {
        writeln!(out, "{clade}\t\t{abundance:.5}\t")?;
    }
    out.flush()?;

    println!(
        "Wrote {} clades ({} species) to {}",
        clades.len(),
        LINEAGES.len(),
        args.output.display()
    );
    Ok(())
}
