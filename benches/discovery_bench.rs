use std::sync::Arc;

use criterion::{criterion_group, criterion_main, Criterion};
use homeserver::{FixedListing, ServiceDiscoveryEngine, ServiceRegistry};

fn process_table(rows: usize) -> String {
    let mut out = String::from(
        "USER PID %CPU %MEM VSZ RSS TT STAT STARTED TIME COMMAND\n",
    );
    for pid in 0..rows {
        let command = match pid % 4 {
            0 => "/usr/bin/node /srv/app/server.js --port 3000",
            1 => "/usr/sbin/nginx -g daemon off;",
            2 => "/usr/lib/postgresql/16/bin/postgres -D /var/lib/postgresql",
            _ => "/bin/bash -l",
        };
        out.push_str(&format!(
            "user {pid} 0.0 0.1 1000 200 ? S 09:00 0:00 {command}\n"
        ));
    }
    out
}

fn bench_discover(c: &mut Criterion) {
    let services = "812 running nginx.service\n- exited ssh.service\n";
    let listing = FixedListing::new(services, process_table(400));
    let engine = ServiceDiscoveryEngine::new(ServiceRegistry::default(), Arc::new(listing));
    c.bench_function("discover_400_processes", |b| b.iter(|| engine.discover()));
}

criterion_group!(benches, bench_discover);
criterion_main!(benches);
