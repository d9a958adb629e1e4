use std::collections::HashMap;
use std::fs;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};

use ftp_client::{Credentials, FtpClient};

/// Server-side filesystem snapshot shared with the test for assertions.
#[derive(Default)]
struct ServerState {
    files: HashMap<String, Vec<u8>>,
    dirs: Vec<String>,
}

impl ServerState {
    fn with_dirs(dirs: &[&str]) -> Self {
        Self {
            files: HashMap::new(),
            dirs: dirs.iter().map(|d| d.to_string()).collect(),
        }
    }
}

/// Minimal scripted FTP server: one control connection, passive mode
/// only, enough commands for the client under test.
struct MockFtpServer {
    port: u16,
    state: Arc<Mutex<ServerState>>,
    handle: JoinHandle<()>,
}

impl MockFtpServer {
    fn start(initial: ServerState) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        let state = Arc::new(Mutex::new(initial));
        let thread_state = Arc::clone(&state);

        let handle = thread::spawn(move || {
            let (stream, _) = listener.accept().unwrap();
            serve_control_connection(stream, thread_state);
        });

        Self { port, state, handle }
    }

    fn connect_client(&self) -> FtpClient {
        let mut client = FtpClient::new();
        assert!(client.connect_with_port("127.0.0.1", &self.port.to_string()));
        client
    }

    fn login_client(&self) -> FtpClient {
        let mut client = self.connect_client();
        assert!(client.login(&Credentials::anonymous()));
        client
    }

    /// Quit the client, wait for the server thread, and hand back the
    /// final server-side state.
    fn finish(self, client: &mut FtpClient) -> Arc<Mutex<ServerState>> {
        assert!(client.quit());
        self.handle.join().unwrap();
        self.state
    }

    fn file_len(&self, path: &str) -> Option<usize> {
        self.state.lock().unwrap().files.get(path).map(Vec::len)
    }
}

fn resolve(cwd: &str, arg: &str) -> String {
    if arg.starts_with('/') {
        arg.to_string()
    } else if cwd == "/" {
        format!("/{arg}")
    } else {
        format!("{cwd}/{arg}")
    }
}

fn serve_control_connection(stream: TcpStream, state: Arc<Mutex<ServerState>>) {
    let mut reader = BufReader::new(stream.try_clone().unwrap());
    let mut control = stream;
    let mut cwd = "/".to_string();
    let mut data_listener: Option<TcpListener> = None;
    let mut rename_from: Option<String> = None;

    control.write_all(b"220 Mock FTP server ready\r\n").unwrap();

    loop {
        let mut line = String::new();
        if reader.read_line(&mut line).unwrap_or(0) == 0 {
            break;
        }
        let line = line.trim_end_matches(['\r', '\n']);
        let (verb, arg) = match line.split_once(' ') {
            Some((v, a)) => (v, a),
            None => (line, ""),
        };

        let reply: String = match verb {
            "USER" => "331 Password required".into(),
            "PASS" => "230 Login successful".into(),
            "NOOP" => "200 Command okay".into(),
            "TYPE" => "200 Type set to I".into(),
            "PWD" => format!("257 \"{cwd}\" is the current directory"),
            "CWD" => {
                let target = resolve(&cwd, arg);
                if state.lock().unwrap().dirs.contains(&target) {
                    cwd = target;
                    "250 Directory changed".into()
                } else {
                    "550 No such directory".into()
                }
            }
            "MKD" => {
                let target = resolve(&cwd, arg);
                state.lock().unwrap().dirs.push(target.clone());
                format!("257 \"{target}\" created")
            }
            "RMD" => {
                let target = resolve(&cwd, arg);
                let mut locked = state.lock().unwrap();
                match locked.dirs.iter().position(|d| d == &target) {
                    Some(i) => {
                        locked.dirs.remove(i);
                        "250 Directory removed".into()
                    }
                    None => "550 No such directory".into(),
                }
            }
            "DELE" => {
                let target = resolve(&cwd, arg);
                if state.lock().unwrap().files.remove(&target).is_some() {
                    "250 File deleted".into()
                } else {
                    "550 No such file".into()
                }
            }
            "RNFR" => {
                let target = resolve(&cwd, arg);
                if state.lock().unwrap().files.contains_key(&target) {
                    rename_from = Some(target);
                    "350 Ready for RNTO".into()
                } else {
                    "550 No such file".into()
                }
            }
            "RNTO" => match rename_from.take() {
                Some(from) => {
                    let target = resolve(&cwd, arg);
                    let mut locked = state.lock().unwrap();
                    let bytes = locked.files.remove(&from).unwrap();
                    locked.files.insert(target, bytes);
                    "250 Renamed".into()
                }
                None => "503 Bad command sequence".into(),
            },
            "PASV" => {
                let listener = TcpListener::bind("127.0.0.1:0").unwrap();
                let port = listener.local_addr().unwrap().port();
                data_listener = Some(listener);
                format!(
                    "227 Entering Passive Mode (127,0,0,1,{},{})",
                    port / 256,
                    port % 256
                )
            }
            "STOR" | "APPE" => match data_listener.take() {
                Some(listener) => {
                    control.write_all(b"150 Opening data connection\r\n").unwrap();
                    let (mut data, _) = listener.accept().unwrap();
                    let mut bytes = Vec::new();
                    data.read_to_end(&mut bytes).unwrap();
                    let target = resolve(&cwd, arg);
                    let mut locked = state.lock().unwrap();
                    if verb == "APPE" {
                        locked.files.entry(target).or_default().extend(bytes);
                    } else {
                        locked.files.insert(target, bytes);
                    }
                    "226 Transfer complete".into()
                }
                None => "425 Use PASV first".into(),
            },
            "RETR" => {
                let target = resolve(&cwd, arg);
                let bytes = state.lock().unwrap().files.get(&target).cloned();
                match (bytes, data_listener.take()) {
                    (Some(bytes), Some(listener)) => {
                        control.write_all(b"150 Opening data connection\r\n").unwrap();
                        let (mut data, _) = listener.accept().unwrap();
                        data.write_all(&bytes).unwrap();
                        drop(data);
                        "226 Transfer complete".into()
                    }
                    (None, _) => "550 No such file".into(),
                    (_, None) => "425 Use PASV first".into(),
                }
            }
            "LIST" => match data_listener.take() {
                Some(listener) => {
                    let dir = if arg.is_empty() {
                        cwd.clone()
                    } else {
                        resolve(&cwd, arg)
                    };
                    control.write_all(b"150 Opening data connection\r\n").unwrap();
                    let (mut data, _) = listener.accept().unwrap();
                    let prefix = if dir == "/" { "/".to_string() } else { format!("{dir}/") };
                    let locked = state.lock().unwrap();
                    for name in locked.files.keys() {
                        if let Some(rest) = name.strip_prefix(&prefix) {
                            if !rest.is_empty() && !rest.contains('/') {
                                data.write_all(format!("{rest}\r\n").as_bytes()).unwrap();
                            }
                        }
                    }
                    drop(data);
                    "226 Transfer complete".into()
                }
                None => "425 Use PASV first".into(),
            },
            "QUIT" => {
                control.write_all(b"221 Goodbye\r\n").unwrap();
                break;
            }
            _ => "500 Unknown command".into(),
        };

        control.write_all(format!("{reply}\r\n").as_bytes()).unwrap();
    }
}

/// Fresh scratch directory for local files.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join("ftp_client_integration").join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn test_unknown_host() {
    let mut client = FtpClient::new();
    assert!(!client.connect("USERNAME_NOT_A_HOST"));
    assert!(!client.is_connected());
}

#[test]
fn test_quit_without_connection() {
    let mut client = FtpClient::new();
    assert!(!client.quit());
}

#[test]
fn test_connect_login_noop() {
    let server = MockFtpServer::start(ServerState::with_dirs(&["/"]));
    let mut client = server.login_client();
    assert!(client.noop());
    server.finish(&mut client);
}

#[test]
fn test_print_then_change_directory() {
    let server = MockFtpServer::start(ServerState::with_dirs(&["/", "/temp"]));
    let mut client = server.login_client();

    assert_eq!(client.pwd().unwrap(), "/");
    assert!(client.cwd("temp"));
    assert_eq!(client.pwd().unwrap(), "/temp");

    server.finish(&mut client);
}

#[test]
fn test_upload_chunk_boundary_sizes() {
    let server = MockFtpServer::start(ServerState::with_dirs(&["/"]));
    let dir = scratch_dir("upload_sizes");
    let mut client = server.login_client();

    // Exactly one chunk, one byte past a chunk, and one past two chunks.
    for size in [1024usize, 1025, 2049] {
        let local = dir.join(format!("local_{size}.bin"));
        fs::write(&local, vec![0x42u8; size]).unwrap();
        let remote = format!("upload_{size}.bin");
        assert!(client.stor(&local, &remote));
        assert_eq!(server.file_len(&format!("/{remote}")), Some(size));
    }

    server.finish(&mut client);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_make_directory_reply() {
    let server = MockFtpServer::start(ServerState::with_dirs(&["/", "/temp"]));
    let mut client = server.login_client();

    assert_eq!(client.mkd("temp/newdir").unwrap(), "/temp/newdir");
    assert!(client.cwd("temp/newdir"));

    let state = server.finish(&mut client);
    assert!(state
        .lock()
        .unwrap()
        .dirs
        .contains(&"/temp/newdir".to_string()));
}

#[test]
fn test_list_empty_directory() {
    let server = MockFtpServer::start(ServerState::with_dirs(&["/", "/temp"]));
    let mut client = server.login_client();

    assert!(client.cwd("temp"));
    assert_eq!(client.list(None).unwrap(), "");

    server.finish(&mut client);
}

#[test]
fn test_list_returns_file_names() {
    let mut state = ServerState::with_dirs(&["/"]);
    state.files.insert("/readme.txt".into(), b"hi".to_vec());
    state.files.insert("/data.bin".into(), vec![0u8; 10]);
    let server = MockFtpServer::start(state);
    let mut client = server.login_client();

    let listing = client.list(None).unwrap();
    assert!(listing.contains("readme.txt"));
    assert!(listing.contains("data.bin"));

    server.finish(&mut client);
}

#[test]
fn test_rename_file() {
    let mut state = ServerState::with_dirs(&["/", "/temp"]);
    state
        .files
        .insert("/temp/oldfilename.txt".into(), b"contents".to_vec());
    let server = MockFtpServer::start(state);
    let mut client = server.login_client();

    assert!(client.rename("temp/oldfilename.txt", "temp/newfilename.txt"));

    let state = server.finish(&mut client);
    let locked = state.lock().unwrap();
    assert!(!locked.files.contains_key("/temp/oldfilename.txt"));
    assert_eq!(locked.files["/temp/newfilename.txt"], b"contents".to_vec());
}

#[test]
fn test_rename_missing_file_fails() {
    let server = MockFtpServer::start(ServerState::with_dirs(&["/"]));
    let mut client = server.login_client();

    assert!(!client.rename("no_such.txt", "other.txt"));

    server.finish(&mut client);
}

#[test]
fn test_retrieve_exact_size() {
    let payload = vec![0x7fu8; 2050];
    let mut state = ServerState::with_dirs(&["/"]);
    state.files.insert("/big.bin".into(), payload.clone());
    let server = MockFtpServer::start(state);

    let dir = scratch_dir("retrieve");
    let dest = dir.join("big.bin");
    let mut client = server.login_client();

    assert!(client.retr("big.bin", &dest));
    assert_eq!(fs::read(&dest).unwrap(), payload);

    server.finish(&mut client);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_stor_then_retr_roundtrip() {
    let server = MockFtpServer::start(ServerState::with_dirs(&["/"]));
    let dir = scratch_dir("roundtrip");

    let original = dir.join("original.bin");
    let copy = dir.join("copy.bin");
    let payload: Vec<u8> = (0..4096u32).map(|i| (i % 251) as u8).collect();
    fs::write(&original, &payload).unwrap();

    let mut client = server.login_client();
    assert!(client.stor(&original, "roundtrip.bin"));
    assert!(client.retr("roundtrip.bin", &copy));
    assert_eq!(fs::read(&copy).unwrap(), payload);

    server.finish(&mut client);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_append_twice_doubles_size() {
    let server = MockFtpServer::start(ServerState::with_dirs(&["/"]));
    let dir = scratch_dir("append");
    let local = dir.join("chunk.bin");
    fs::write(&local, vec![0x11u8; 1000]).unwrap();

    let mut client = server.login_client();
    assert!(client.appe(&local, "grow.bin"));
    assert_eq!(server.file_len("/grow.bin"), Some(1000));
    assert!(client.appe(&local, "grow.bin"));
    assert_eq!(server.file_len("/grow.bin"), Some(2000));

    server.finish(&mut client);
    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_delete_and_remove_directory() {
    let mut state = ServerState::with_dirs(&["/", "/gone"]);
    state.files.insert("/junk.txt".into(), b"x".to_vec());
    let server = MockFtpServer::start(state);
    let mut client = server.login_client();

    assert!(client.dele("junk.txt"));
    assert!(!client.dele("junk.txt"));
    assert!(client.rmd("gone"));
    assert!(!client.cwd("gone"));

    server.finish(&mut client);
}

#[test]
fn test_retr_missing_server_file_fails() {
    let server = MockFtpServer::start(ServerState::with_dirs(&["/"]));
    let dir = scratch_dir("retr_missing");
    let dest = dir.join("never.bin");
    let mut client = server.login_client();

    assert!(!client.retr("no_such.bin", &dest));
    assert!(!dest.exists());

    server.finish(&mut client);
    fs::remove_dir_all(&dir).unwrap();
}
