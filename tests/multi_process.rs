//! Scenario 6 (§8): running the same instance with 1, 2 and 4 worker
//! processes must produce bit-identical results. This drives the actual
//! compiled binary, since the multi-process path re-execs it as a genuine
//! child process (§4.7) — something the library API alone can't exercise.

use std::io::Write;
use std::process::Command;

fn graph_file(name: &str, contents: &str) -> std::path::PathBuf {
    let mut path = std::env::temp_dir();
    path.push(format!("balanced-mincut-test-{name}-{}.txt", std::process::id()));
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    path
}

fn run_with_processes(path: &std::path::Path, a: usize, processes: usize) -> String {
    let exe = env!("CARGO_BIN_EXE_balanced-mincut");
    let output = Command::new(exe)
        .arg(path)
        .arg(a.to_string())
        .arg("--threads")
        .arg("2")
        .arg("--processes")
        .arg(processes.to_string())
        .arg("--frontier-depth")
        .arg("2")
        .arg("--guesstimate-tries")
        .arg("100")
        .output()
        .expect("failed to run the compiled binary");
    assert!(output.status.success(), "run failed: {}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout).unwrap()
}

fn first_line(s: &str) -> &str {
    s.lines().next().unwrap()
}

#[test]
fn one_two_and_four_processes_agree_on_scenario_1() {
    let contents = "4\n0 1 2 3\n1 0 4 5\n2 4 0 6\n3 5 6 0\n";
    let path = graph_file("scenario1", contents);

    let out1 = run_with_processes(&path, 2, 1);
    let out2 = run_with_processes(&path, 2, 2);
    let out4 = run_with_processes(&path, 2, 4);

    assert_eq!(first_line(&out1), "14");
    assert_eq!(first_line(&out1), first_line(&out2));
    assert_eq!(first_line(&out1), first_line(&out4));

    std::fs::remove_file(&path).ok();
}

#[test]
fn one_two_and_four_processes_agree_on_scenario_4() {
    let n = 6;
    let mut rows = vec![n.to_string()];
    for i in 0..n {
        let row: Vec<String> = (0..n).map(|j| ((i as i64 - j as i64).abs()).to_string()).collect();
        rows.push(row.join(" "));
    }
    let contents = rows.join("\n") + "\n";
    let path = graph_file("scenario4", &contents);

    let out1 = run_with_processes(&path, 3, 1);
    let out2 = run_with_processes(&path, 3, 2);
    let out4 = run_with_processes(&path, 3, 4);

    assert_eq!(first_line(&out1), first_line(&out2));
    assert_eq!(first_line(&out1), first_line(&out4));

    std::fs::remove_file(&path).ok();
}
