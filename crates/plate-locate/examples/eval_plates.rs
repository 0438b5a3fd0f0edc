use std::{
    env,
    path::{Path, PathBuf},
};

use image::ImageReader;
use log::LevelFilter;

use plate_locate::detect::detect_plate_image_lower_band;
use plate_locate::{EvalReport, GroundTruth, LowerBandParams, PlateDetector, PlateDetectorParams, Rect};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    plate_locate::core::init_with_level(LevelFilter::Warn)?;

    let (gt_path, image_dir) = parse_args();
    let ground_truth = GroundTruth::load_json(&gt_path)?;

    let detector = PlateDetector::new(PlateDetectorParams::default());
    let band = LowerBandParams::default();

    let mut report = EvalReport::default();
    for (name, &gt_box) in &ground_truth.0 {
        let path = image_dir.join(name);
        let img = match ImageReader::open(&path).map_err(|e| e.to_string()).and_then(|r| r.decode().map_err(|e| e.to_string())) {
            Ok(img) => img.to_rgb8(),
            Err(err) => {
                eprintln!("skipping {name}: {err}");
                continue;
            }
        };

        let predicted = detect_plate_image_lower_band(&img, &detector, &band);
        report.push(name.clone(), Rect::from_corner_box(gt_box), predicted);

        let record = report.records.last().expect("just pushed");
        match record.predicted {
            Some(b) => println!("{name}: predicted {b:?}, IoU {:.3}", record.iou),
            None => println!("{name}: no plate detected"),
        }
    }

    println!(
        "images: {}  detected: {}  mean IoU: {:.3}",
        report.records.len(),
        report.detected,
        report.mean_iou
    );

    report.write_json("eval_report.json")?;
    println!("wrote eval_report.json");
    Ok(())
}

fn parse_args() -> (PathBuf, PathBuf) {
    let mut args = env::args().skip(1);
    let gt = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/annotations.json"));
    let dir = args.next().map(PathBuf::from).unwrap_or_else(|| {
        gt.parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    });
    (gt, dir)
}
