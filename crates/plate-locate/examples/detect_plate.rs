use std::{env, path::PathBuf};

use image::ImageReader;
use log::LevelFilter;

use plate_locate::detect::{detect_plate_image, draw_rect, gray_to_luma8, preprocess_plate_image};
use plate_locate::{PlateDetector, PlateDetectorParams};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    plate_locate::core::init_with_level(LevelFilter::Info)?;

    let image_path = parse_image_path();
    let img = ImageReader::open(&image_path)?.decode()?.to_rgb8();

    let detector = PlateDetector::new(PlateDetectorParams::default());
    let rect = detect_plate_image(&img, &detector);

    if rect.is_empty() {
        println!("no license plate detected in {}", image_path.display());
        return Ok(());
    }

    println!(
        "license plate at x={} y={} size {}x{}",
        rect.x, rect.y, rect.width, rect.height
    );

    let mut overlay = img.clone();
    draw_rect(&mut overlay, &rect, [0, 255, 0], 2);
    overlay.save("plate_overlay.png")?;
    println!("wrote plate_overlay.png");

    if let Some(binary) = preprocess_plate_image(&img, &rect, &detector) {
        if let Some(luma) = gray_to_luma8(&binary) {
            luma.save("plate_binary.png")?;
            println!("wrote plate_binary.png");
        }
    }

    Ok(())
}

fn parse_image_path() -> PathBuf {
    env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("testdata/car.png"))
}
