// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use napi_prebuilts::addon::{
    ArtifactSelection, compatible_napi_versions, compatible_paths_for, copy_artifacts,
};
use napi_prebuilts::models::{LoaderOptions, Triplet};
use napi_prebuilts::paths::triplet_directory_name;
use napi_prebuilts::platform::LocalFileSystem;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn linux_triplet() -> Triplet {
    Triplet::new("linux", "x64", Some("glibc".to_string())).unwrap()
}

/// Benchmark candidate enumeration for typical and large version lists
pub fn benchmark_compatible_paths(c: &mut Criterion) {
    let mut group = c.benchmark_group("compatible_paths");
    let triplet = linux_triplet();

    let typical = LoaderOptions::new("addon", vec![3, 9, 6]).unwrap();
    group.bench_function("typical_version_list", |b| {
        b.iter(|| {
            compatible_paths_for(
                black_box(&typical),
                black_box(&triplet),
                black_box(8),
                Some(Path::new("/pkg")),
            )
        })
    });

    let large = LoaderOptions::new("addon", (1..=64).rev().collect()).unwrap();
    group.bench_function("large_version_list", |b| {
        b.iter(|| {
            compatible_paths_for(
                black_box(&large),
                black_box(&triplet),
                black_box(32),
                Some(Path::new("/pkg")),
            )
        })
    });

    let versions: Vec<u32> = (1..=64).collect();
    group.bench_function("version_filtering_only", |b| {
        b.iter(|| compatible_napi_versions(black_box(&versions), black_box(32)))
    });

    group.finish();
}

/// Benchmark triplet directory naming
pub fn benchmark_triplet_naming(c: &mut Criterion) {
    let with_libc = linux_triplet();
    let without_libc = Triplet::new("win32", "x64", None).unwrap();

    c.bench_function("triplet_directory_name", |b| {
        b.iter(|| {
            (
                triplet_directory_name(black_box(&with_libc)),
                triplet_directory_name(black_box(&without_libc)),
            )
        })
    });
}

/// Benchmark placing an addon into a fresh package directory
pub fn benchmark_copy_artifacts(c: &mut Criterion) {
    let triplet = linux_triplet();
    let artifacts = ArtifactSelection {
        name: Some("addon".to_string()),
        files: vec!["libfoo.so".to_string()],
    };

    c.bench_function("copy_artifacts_fresh_package", |b| {
        b.iter_batched(
            || {
                let temp_dir = TempDir::new().unwrap();
                let build_dir = temp_dir.path().join("build");
                fs::create_dir_all(&build_dir).unwrap();
                fs::write(build_dir.join("addon.node"), vec![0u8; 64 * 1024]).unwrap();
                fs::write(build_dir.join("libfoo.so"), vec![0u8; 16 * 1024]).unwrap();
                temp_dir
            },
            |temp_dir| {
                copy_artifacts(
                    &LocalFileSystem,
                    &temp_dir.path().join("build"),
                    &temp_dir.path().join("package"),
                    &triplet,
                    8,
                    &artifacts,
                )
                .unwrap();
                temp_dir
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    benchmark_compatible_paths,
    benchmark_triplet_naming,
    benchmark_copy_artifacts
);
criterion_main!(benches);
