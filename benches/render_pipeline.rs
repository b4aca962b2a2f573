use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use fractal_viewport::{
    MandelbrotAlgorithm, MandelbrotColourMapKinds, NeverCancel,
    generate_fractal_parallel_rayon_cancelable, generate_pixel_buffer_cancelable,
    mandelbrot_colour_map_factory,
};

const WIDTH: u32 = 800;
const HEIGHT: u32 = 600;

fn bench_fractal(c: &mut Criterion) {
    let mut group = c.benchmark_group("mandelbrot_fractal");
    group.sample_size(20);

    for max_iterations in [64u32, 256, 1024] {
        let algorithm =
            MandelbrotAlgorithm::new(WIDTH, HEIGHT, (-0.5, 0.0), 1.25, max_iterations).unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(max_iterations),
            &algorithm,
            |b, algorithm| {
                b.iter(|| {
                    generate_fractal_parallel_rayon_cancelable(
                        WIDTH,
                        HEIGHT,
                        black_box(algorithm),
                        &NeverCancel,
                    )
                    .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_colour_mapping(c: &mut Criterion) {
    let max_iterations = 256;
    let algorithm =
        MandelbrotAlgorithm::new(WIDTH, HEIGHT, (-0.5, 0.0), 1.25, max_iterations).unwrap();
    let iterations =
        generate_fractal_parallel_rayon_cancelable(WIDTH, HEIGHT, &algorithm, &NeverCancel)
            .unwrap();

    let mut group = c.benchmark_group("mandelbrot_colour_map");

    for &kind in MandelbrotColourMapKinds::ALL {
        let colour_map = mandelbrot_colour_map_factory(kind, max_iterations);

        group.bench_function(kind.display_name(), |b| {
            b.iter(|| {
                generate_pixel_buffer_cancelable(
                    black_box(iterations.clone()),
                    &*colour_map,
                    WIDTH,
                    HEIGHT,
                    &NeverCancel,
                )
                .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_fractal, bench_colour_mapping);
criterion_main!(benches);
