#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::pedantic)]
#![allow(clippy::unwrap_used)]

//! Probe-depth measurement for linear probing tables.
//!
//! Fills simulated tables at a ladder of load factors, records how many
//! slots inserts and lookups touch, then repeats the lookups after
//! remove/reinsert churn has salted the table with tombstones. Prints
//! per-step statistics and renders the results as line charts.

use plotters::prelude::*;
use rand::Rng;

// Simulated table size; a power of two so the home slot is a bitmask
const TABLE_SIZE: usize = 1 << 16;
// Create load factors from 0.1 to 0.95 with 10 steps
const NUM_LOAD_FACTORS: usize = 10;
// Fraction of live keys removed and replaced per churn round
const CHURN_FRACTION: f64 = 0.25;
const CHURN_ROUNDS: usize = 4;
// Failed lookups sampled per load factor
const MISS_SAMPLES: usize = 1_000;

/// A slot of the simulated table
#[derive(Clone, Copy)]
enum Slot {
    Empty,
    Tombstone,
    Occupied(u64),
}

// Fibonacci-style multiplicative hash down to a table index
fn home_index(key: u64) -> usize {
    ((key.wrapping_mul(0x9E37_79B9_7F4A_7C15) >> 48) as usize) & (TABLE_SIZE - 1)
}

// Linear probing insert; returns the number of slots touched
fn insert(table: &mut [Slot], key: u64) -> usize {
    let mut index = home_index(key);
    let mut probes = 1;
    let mut reusable = None;

    for _ in 0..TABLE_SIZE {
        match table[index] {
            Slot::Empty => {
                table[reusable.unwrap_or(index)] = Slot::Occupied(key);
                return probes;
            }
            Slot::Tombstone => {
                if reusable.is_none() {
                    reusable = Some(index);
                }
            }
            Slot::Occupied(existing) if existing == key => return probes,
            Slot::Occupied(_) => {}
        }

        index = (index + 1) & (TABLE_SIZE - 1);
        probes += 1;
    }

    // Full revolution without an empty slot: fall back to the first
    // tombstone passed
    if let Some(reusable) = reusable {
        table[reusable] = Slot::Occupied(key);
    }
    probes
}

// Linear probing lookup; returns the number of slots touched before the
// scan resolved (match or first empty slot)
fn lookup(table: &[Slot], key: u64) -> usize {
    let mut index = home_index(key);
    let mut probes = 1;

    for _ in 0..TABLE_SIZE {
        match table[index] {
            Slot::Empty => return probes,
            Slot::Occupied(existing) if existing == key => return probes,
            _ => {}
        }
        index = (index + 1) & (TABLE_SIZE - 1);
        probes += 1;
    }

    probes
}

fn remove(table: &mut [Slot], key: u64) {
    let mut index = home_index(key);

    for _ in 0..TABLE_SIZE {
        match table[index] {
            Slot::Empty => return,
            Slot::Occupied(existing) if existing == key => {
                table[index] = Slot::Tombstone;
                return;
            }
            _ => {}
        }
        index = (index + 1) & (TABLE_SIZE - 1);
    }
}

fn average(probes: &[usize]) -> f64 {
    probes.iter().sum::<usize>() as f64 / probes.len() as f64
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Generate load factors from 0.1 to 0.95
    let load_factors: Vec<f64> = (0..NUM_LOAD_FACTORS)
        .map(|i| 0.1 + (0.95 - 0.1) * (i as f64) / ((NUM_LOAD_FACTORS - 1) as f64))
        .collect();

    let num_keys: Vec<usize> =
        load_factors.iter().map(|&load| (TABLE_SIZE as f64 * load) as usize).collect();

    println!("Load factors: {:?}", load_factors);
    println!("Number of keys: {:?}", num_keys);

    let mut insert_avg: Vec<f64> = Vec::new();
    let mut hit_avg: Vec<f64> = Vec::new();
    let mut miss_avg: Vec<f64> = Vec::new();
    let mut churned_hit_avg: Vec<f64> = Vec::new();
    let mut churned_miss_avg: Vec<f64> = Vec::new();

    let mut rng = rand::rng();

    for (step, &n_keys) in num_keys.iter().enumerate() {
        println!("Load factor {:.2}: inserting {} keys", load_factors[step], n_keys);

        let mut table = vec![Slot::Empty; TABLE_SIZE];
        let mut live: Vec<u64> = (0..n_keys).map(|_| rng.random::<u64>()).collect();

        // Fresh fill
        let insert_probes: Vec<usize> =
            live.iter().map(|&key| insert(&mut table, key)).collect();

        let hit_probes: Vec<usize> = live.iter().map(|&key| lookup(&table, key)).collect();
        let miss_probes: Vec<usize> =
            (0..MISS_SAMPLES).map(|_| lookup(&table, rng.random::<u64>())).collect();

        insert_avg.push(average(&insert_probes));
        hit_avg.push(average(&hit_probes));
        miss_avg.push(average(&miss_probes));

        // Churn: remove a slice of the live keys and replace them, leaving
        // tombstones behind at the same occupancy
        for _ in 0..CHURN_ROUNDS {
            let to_replace = ((live.len() as f64) * CHURN_FRACTION) as usize;
            for _ in 0..to_replace {
                let victim = live.swap_remove(rng.random_range(0..live.len()));
                remove(&mut table, victim);
            }
            for _ in 0..to_replace {
                let fresh = rng.random::<u64>();
                insert(&mut table, fresh);
                live.push(fresh);
            }
        }

        let churned_hits: Vec<usize> = live.iter().map(|&key| lookup(&table, key)).collect();
        let churned_misses: Vec<usize> =
            (0..MISS_SAMPLES).map(|_| lookup(&table, rng.random::<u64>())).collect();

        churned_hit_avg.push(average(&churned_hits));
        churned_miss_avg.push(average(&churned_misses));

        println!(
            "  insert = {:.2}, hit = {:.2}, miss = {:.2}, churned hit = {:.2}, churned miss = {:.2}",
            insert_avg[step], hit_avg[step], miss_avg[step], churned_hit_avg[step], churned_miss_avg[step]
        );
    }

    let font_family = "sans-serif";
    let colors = [
        RGBColor(220, 50, 50),  // Bright red
        RGBColor(50, 90, 220),  // Bright blue
        RGBColor(50, 180, 50),  // Bright green
        RGBColor(180, 50, 180), // Bright magenta
    ];
    let line_width = 2;
    let marker_size = 4;
    let text_size = 16;
    let title_size = 35;

    // Plot 1: average probes on a fresh table
    let root = BitMapBackend::new("probe_depth.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let fresh_series: [(&str, &Vec<f64>); 3] =
        [("Insert", &insert_avg), ("Lookup hit", &hit_avg), ("Lookup miss", &miss_avg)];

    let max_fresh = fresh_series
        .iter()
        .flat_map(|(_, v)| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Linear Probing: Probe Depth on a Fresh Table", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..1.0f64, 0.0..max_fresh)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Average Probes per Operation")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (series_idx, (name, values)) in fresh_series.iter().enumerate() {
        let color = &colors[series_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                load_factors.iter().zip(values.iter()).map(|(&x, &y)| (x, y)),
                line_style,
            ))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            load_factors
                .iter()
                .zip(values.iter())
                .map(|(&x, &y)| Circle::new((x, y), marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    // Plot 2: tombstone pressure after churn
    let root = BitMapBackend::new("probe_depth_churn.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let churn_series: [(&str, &Vec<f64>); 4] = [
        ("Hit, fresh", &hit_avg),
        ("Hit, churned", &churned_hit_avg),
        ("Miss, fresh", &miss_avg),
        ("Miss, churned", &churned_miss_avg),
    ];

    let max_churn = churn_series
        .iter()
        .flat_map(|(_, v)| v.iter())
        .fold(0.0, |max, &x| if x > max { x } else { max }) *
        1.1; // Add 10% margin

    let mut chart = ChartBuilder::on(&root)
        .caption("Linear Probing: Lookup Cost After Churn", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .right_y_label_area_size(10)
        .build_cartesian_2d(0.0..1.0f64, 0.0..max_churn)?;

    chart
        .configure_mesh()
        .x_desc("Load Factor")
        .y_desc("Average Probes per Lookup")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    for (series_idx, (name, values)) in churn_series.iter().enumerate() {
        let color = &colors[series_idx % colors.len()];
        let line_style = ShapeStyle::from(color).stroke_width(line_width);

        chart
            .draw_series(LineSeries::new(
                load_factors.iter().zip(values.iter()).map(|(&x, &y)| (x, y)),
                line_style,
            ))?
            .label(*name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line_style));

        chart.draw_series(
            load_factors
                .iter()
                .zip(values.iter())
                .map(|(&x, &y)| Circle::new((x, y), marker_size, color.filled())),
        )?;
    }

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    println!("Generated plot images: probe_depth.png, probe_depth_churn.png");

    Ok(())
}
