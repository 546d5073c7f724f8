use criterion::{black_box, criterion_group, criterion_main, Criterion};
use image::{DynamicImage, Rgb, RgbImage};
use upholstery_quote::photo::metrics::{luma_plane, mean_sobel_magnitude};
use upholstery_quote::PhotoChecker;

fn phone_photo() -> DynamicImage {
    // 12MP-ish frame with texture everywhere
    let img = RgbImage::from_fn(4000, 3000, |x, y| {
        let v = ((x * 7 + y * 13) % 251) as u8;
        Rgb([v, v.wrapping_add(40), v.wrapping_sub(30)])
    });
    DynamicImage::ImageRgb8(img)
}

fn benchmark_photo_check(c: &mut Criterion) {
    let photo = phone_photo();
    let checker = PhotoChecker::default();

    c.bench_function("check_image_4000x3000", |b| {
        b.iter(|| black_box(checker.check_image(black_box(&photo))))
    });

    let small = RgbImage::from_fn(256, 192, |x, y| {
        let v = ((x ^ y) & 0xff) as u8;
        Rgb([v, v, v])
    });
    let plane = luma_plane(&small);
    c.bench_function("sobel_256x192", |b| {
        b.iter(|| black_box(mean_sobel_magnitude(black_box(&plane))))
    });
}

criterion_group!(benches, benchmark_photo_check);
criterion_main!(benches);
