use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{rngs::SmallRng, Rng, SeedableRng};
use region_quadtree::{Point, Quadtree, QuadtreeConfig, Region};

const EXTENT: i32 = 3900 * 2;

fn get_rand() -> impl rand::Rng {
    SmallRng::seed_from_u64(0xdeadbeef)
}

fn rand_point(rng: &mut impl Rng) -> Point {
    Point::new(rng.gen_range(0, EXTENT), rng.gen_range(0, EXTENT))
}

fn make_tree(rng: &mut impl Rng, size: usize) -> (Quadtree, Vec<Point>) {
    let config = QuadtreeConfig::new(10, 8).unwrap();
    let region = Region::new(0, 0, EXTENT, EXTENT).unwrap();
    let mut tree = Quadtree::new(region, config).unwrap();
    let points = (0..size).map(|_| rand_point(&mut *rng)).collect::<Vec<_>>();
    tree.extend(points.iter().copied());
    (tree, points)
}

fn contains_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree contains_rand");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, move |b, &size| {
            let mut rng = get_rand();
            let (tree, _) = make_tree(&mut rng, size);

            b.iter(|| {
                let p = rand_point(&mut rng);
                tree.contains(p.x(), p.y())
            })
        });
    }
    group.finish();
}

fn nearest_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree nearest");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let (tree, _) = make_tree(&mut rng, size);

            b.iter(|| {
                let p = rand_point(&mut rng);
                black_box(tree.nearest(&p))
            });
        });
    }
    group.finish();
}

fn from_points_rand(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree from_points");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();

            b.iter(|| {
                Quadtree::from_points(
                    QuadtreeConfig::default(),
                    (0..size).map(|_| rand_point(&mut rng)),
                )
                .unwrap()
            });
        });
    }
    group.finish();
}

fn rebuild_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree rebuild");
    for size in 8..16 {
        let size = 1 << size;

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let (mut tree, _) = make_tree(&mut rng, 0);

            b.iter(|| {
                tree.clear();
                tree.extend((0..size).map(|_| rand_point(&mut rng)));
            });
        });
    }
    group.finish();
}

fn delete_reinsert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree delete then reinsert");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let (mut tree, points) = make_tree(&mut rng, size);

            b.iter(|| {
                let p = points[rng.gen_range(0, points.len())];
                let found = tree.delete(p.x(), p.y());
                tree.insert(p).unwrap();
                found
            });
        });
    }
    group.finish();
}

fn for_each_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree for_each");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let (tree, _) = make_tree(&mut rng, size);

            b.iter(|| {
                let mut sum = 0i64;
                tree.for_each(|p| sum += i64::from(p.x()));
                black_box(sum)
            });
        });
    }
    group.finish();
}

fn random_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("Quadtree random_insert");
    for size in 8..16 {
        let size = 1 << size;
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            let mut rng = get_rand();
            let (mut tree, _) = make_tree(&mut rng, size);

            b.iter(|| {
                let p = rand_point(&mut rng);
                tree.insert(p).unwrap()
            });
        });
    }
    group.finish();
}

criterion_group!(
    quadtree_benches,
    contains_rand,
    nearest_rand,
    from_points_rand,
    random_insert,
    rebuild_tree,
    delete_reinsert,
    for_each_all,
);

criterion_main!(quadtree_benches);
