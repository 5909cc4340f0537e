use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

use scribble_engine::{
    encouragement, AlphaMask, MemoryAchievements, SessionConfig, SessionPhase, TargetRect,
    TraceEvent, TraceSession,
};

/// Parse a rectangle given as "x,y,width,height".
fn parse_rect(raw: &str) -> Result<TargetRect> {
    let parts: Vec<f32> = raw
        .split(',')
        .map(|s| s.trim().parse::<f32>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("invalid rect '{raw}'"))?;
    if parts.len() != 4 {
        bail!("invalid rect '{raw}', expected x,y,width,height");
    }
    Ok(TargetRect::new(parts[0], parts[1], parts[2], parts[3]))
}

#[derive(Debug, Deserialize)]
pub struct StrokeScript {
    pub strokes: Vec<ScriptStroke>,
}

#[derive(Debug, Deserialize)]
pub struct ScriptStroke {
    pub points: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct OutlineReport {
    pub found: bool,
    pub sample_count: usize,
    pub samples: Vec<[f32; 2]>,
}

#[derive(Debug, Serialize)]
pub struct ReplayReport {
    pub coverage: f32,
    pub complete: bool,
    pub stars: Option<u8>,
    pub milestones: Vec<MilestoneLine>,
}

#[derive(Debug, Serialize)]
pub struct MilestoneLine {
    pub index: u8,
    pub message: &'static str,
}

/// Extract the outline and report its samples.
pub fn extract_report(img: &RgbaImage, rect: TargetRect, samples: usize) -> OutlineReport {
    let mut config = SessionConfig::default();
    config.sample_count = samples;

    let mask = AlphaMask::from_image(img, config.alpha_threshold, config.pad_fraction);
    let outline = scribble_engine::extract_outline(&mask, rect, config.border_reject_fraction);
    let points = outline
        .as_ref()
        .map(|path| scribble_engine::sample_path(path, config.sample_count))
        .unwrap_or_default();

    OutlineReport {
        found: outline.is_some(),
        sample_count: points.len(),
        samples: points.iter().map(|p| [p.x, p.y]).collect(),
    }
}

/// Run a full round: extract on the worker, wait for it to settle, then
/// feed every scripted stroke through the session.
pub fn replay_report(img: RgbaImage, rect: TargetRect, script: &StrokeScript) -> Result<ReplayReport> {
    let mut session = TraceSession::new(
        "replay",
        SessionConfig::default(),
        Box::new(MemoryAchievements::new()),
    );
    session.begin_round(Arc::new(img), rect);

    let mut settled = false;
    for _ in 0..2000 {
        session.tick();
        if session.phase() != SessionPhase::AwaitingOutline {
            settled = true;
            break;
        }
        thread::sleep(Duration::from_millis(2));
    }
    if !settled {
        bail!("outline extraction did not finish");
    }

    for stroke in &script.strokes {
        let mut points = stroke.points.iter().map(|p| (p[0], p[1]));
        let Some((x, y)) = points.next() else { continue };
        session.pointer_down(glam::Vec2::new(x, y));
        let mut last = (x, y);
        for (x, y) in points {
            session.pointer_move(glam::Vec2::new(x, y));
            last = (x, y);
        }
        session.pointer_up(glam::Vec2::new(last.0, last.1));
    }

    let mut milestones = Vec::new();
    let mut stars = None;
    for event in session.drain_events() {
        match event {
            TraceEvent::MilestoneReached { index } => milestones.push(MilestoneLine {
                index,
                message: encouragement(index).unwrap_or(""),
            }),
            TraceEvent::RoundComplete { stars: rating } => stars = Some(rating.count()),
            _ => {}
        }
    }

    Ok(ReplayReport {
        coverage: session.coverage(),
        complete: session.phase() == SessionPhase::Complete,
        stars,
        milestones,
    })
}

fn emit_json<T: Serialize>(report: &T, out: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    match out {
        Some(path) => {
            fs::write(path, &json).with_context(|| format!("writing {}", path.display()))?;
            println!("wrote report: {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

fn load_rgba(path: &Path) -> Result<RgbaImage> {
    Ok(image::open(path)
        .with_context(|| format!("opening {}", path.display()))?
        .to_rgba8())
}

pub fn run_extract(image: &Path, rect: &str, samples: usize, out: Option<&Path>) -> Result<()> {
    let img = load_rgba(image)?;
    let report = extract_report(&img, parse_rect(rect)?, samples);
    emit_json(&report, out)
}

pub fn run_replay(image: &Path, script: &Path, rect: &str, out: Option<&Path>) -> Result<()> {
    let img = load_rgba(image)?;
    let raw = fs::read_to_string(script)
        .with_context(|| format!("reading {}", script.display()))?;
    let script: StrokeScript =
        serde_json::from_str(&raw).with_context(|| format!("parsing {}", script.display()))?;
    let report = replay_report(img, parse_rect(rect)?, &script)?;
    emit_json(&report, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn ring_image() -> RgbaImage {
        // Opaque disc on a transparent background.
        let mut img = RgbaImage::new(64, 64);
        for y in 0..64i32 {
            for x in 0..64i32 {
                let dx = x - 32;
                let dy = y - 32;
                if dx * dx + dy * dy <= 24 * 24 {
                    img.put_pixel(x as u32, y as u32, Rgba([200, 120, 40, 255]));
                }
            }
        }
        img
    }

    #[test]
    fn parse_rect_valid_and_invalid() {
        let rect = parse_rect("10, 20, 300, 400").unwrap();
        assert_eq!(rect.min.x, 10.0);
        assert_eq!(rect.size.y, 400.0);
        assert!(parse_rect("1,2,3").is_err());
        assert!(parse_rect("a,b,c,d").is_err());
    }

    #[test]
    fn extract_report_finds_disc_outline() {
        let report = extract_report(&ring_image(), TargetRect::new(0.0, 0.0, 200.0, 200.0), 100);
        assert!(report.found);
        assert_eq!(report.sample_count, 100);
        assert_eq!(report.samples.len(), 100);
    }

    #[test]
    fn extract_report_on_blank_image() {
        let blank = RgbaImage::new(32, 32);
        let report = extract_report(&blank, TargetRect::new(0.0, 0.0, 200.0, 200.0), 100);
        assert!(!report.found);
        assert_eq!(report.sample_count, 0);
    }

    #[test]
    fn replay_full_trace_earns_three_stars() {
        // Trace the extracted samples themselves: a perfect trace.
        let rect = TargetRect::new(0.0, 0.0, 200.0, 200.0);
        let outline = extract_report(&ring_image(), rect, 400);
        let script = StrokeScript {
            strokes: vec![ScriptStroke {
                points: outline.samples.clone(),
            }],
        };

        let report = replay_report(ring_image(), rect, &script).unwrap();
        assert!(report.complete);
        assert_eq!(report.stars, Some(3));
        assert!(report.coverage >= 0.95);
        assert_eq!(report.milestones.len(), 3);
        assert_eq!(report.milestones[1].message, "Halfway there!");
    }

    #[test]
    fn replay_partial_trace_stays_open() {
        let rect = TargetRect::new(0.0, 0.0, 200.0, 200.0);
        let outline = extract_report(&ring_image(), rect, 400);
        let script = StrokeScript {
            strokes: vec![ScriptStroke {
                points: outline.samples[..280].to_vec(),
            }],
        };

        let report = replay_report(ring_image(), rect, &script).unwrap();
        assert!(!report.complete);
        assert!(report.stars.is_none());
        assert!(report.coverage < 0.88);
    }

    #[test]
    fn report_writes_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("report.json");
        let report = extract_report(&ring_image(), TargetRect::new(0.0, 0.0, 100.0, 100.0), 50);
        emit_json(&report, Some(out.as_path())).unwrap();

        let raw = fs::read_to_string(&out).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed["sample_count"], 50);
    }
}
