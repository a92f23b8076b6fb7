/*
 * Created on Sat Feb 19 2022
 *
 * This file is a part of Oakdb
 * Oakdb is a free and open-source concurrent ordered key/value database
 * written by Ray Mercer ("the Author") with the vision to provide safe
 * shared access to tree-structured data without compromising on
 * correctness or simplicity
 *
 * Copyright (c) 2022, Ray Mercer <hey.raymercer@outlook.com>
 *
 * This program is free software: you can redistribute it and/or modify
 * it under the terms of the GNU Affero General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * This program is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU Affero General Public License for more details.
 *
 * You should have received a copy of the GNU Affero General Public License
 * along with this program. If not, see <https://www.gnu.org/licenses/>.
 *
*/

//! End-to-end tests: whole command lines in, response phrases out

mod scenario_tests {
    use crate::queryengine;
    use crate::store::Store;

    fn exec(store: &Store, line: &str) -> String {
        String::from_utf8(queryengine::execute(store, line).to_vec()).unwrap()
    }

    #[test]
    fn test_add_and_query() {
        let store = Store::new();
        assert_eq!(exec(&store, "a alpha 1"), "added");
        assert_eq!(exec(&store, "a beta 2"), "added");
        assert_eq!(exec(&store, "q alpha"), "1");
        assert_eq!(exec(&store, "q gamma"), "not found");
    }

    #[test]
    fn test_duplicate_add_keeps_first_value() {
        let store = Store::new();
        assert_eq!(exec(&store, "a k v1"), "added");
        assert_eq!(exec(&store, "a k v2"), "already in database");
        assert_eq!(exec(&store, "q k"), "v1");
    }

    #[test]
    fn test_delete_inner_node() {
        let store = Store::new();
        for line in ["a m 1", "a f 1", "a t 1", "a a 1", "a h 1"] {
            assert_eq!(exec(&store, line), "added");
        }
        assert_eq!(exec(&store, "d m"), "removed");
        assert_eq!(exec(&store, "q m"), "not found");
        assert_eq!(exec(&store, "q t"), "1");
        assert_eq!(exec(&store, "q f"), "1");
    }

    #[test]
    fn test_delete_twice() {
        let store = Store::new();
        assert_eq!(exec(&store, "a a 1"), "added");
        assert_eq!(exec(&store, "d a"), "removed");
        assert_eq!(exec(&store, "d a"), "not in database");
    }

    #[test]
    fn test_unknown_verb() {
        let store = Store::new();
        assert_eq!(exec(&store, "z foo"), "ill-formed command");
    }

    #[test]
    fn test_bad_arity_and_oversized_tokens() {
        let store = Store::new();
        assert_eq!(exec(&store, "q"), "ill-formed command");
        assert_eq!(exec(&store, "a nameonly"), "ill-formed command");
        assert_eq!(exec(&store, "d one two"), "ill-formed command");
        assert_eq!(exec(&store, ""), "ill-formed command");
        assert_eq!(exec(&store, "   "), "ill-formed command");
        let fat = format!("a {} v", "x".repeat(256));
        assert_eq!(exec(&store, &fat), "ill-formed command");
    }

    #[test]
    fn test_verb_without_separating_space() {
        // the verb is the first character; "qalpha" asks for "alpha"
        let store = Store::new();
        assert_eq!(exec(&store, "a alpha 1"), "added");
        assert_eq!(exec(&store, "qalpha"), "1");
    }

    #[test]
    fn test_missing_batch_file() {
        let store = Store::new();
        assert_eq!(exec(&store, "f /no/such/path"), "bad file name");
    }

    #[test]
    fn test_batch_file_applies_silently() {
        use std::fs;
        let store = Store::new();
        let path = std::env::temp_dir().join(format!("oakd-batch-{}.txt", std::process::id()));
        fs::write(&path, "a one 1\na two 2\nd one\nnonsense\n").unwrap();
        assert_eq!(
            exec(&store, &format!("f {}", path.display())),
            "file processed"
        );
        assert_eq!(exec(&store, "q one"), "not found");
        assert_eq!(exec(&store, "q two"), "2");
        let _ = fs::remove_file(path);
    }
}

mod pause_tests {
    use crate::arbiter::{SessionTable, SlotState};
    use crate::clients::{Session, Transport};
    use crate::registry::PauseGate;
    use crate::store::Store;
    use parking_lot::Mutex;
    use std::io::Result as IoResult;
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    /// feeds a canned command list and records every response
    struct ScriptedTransport {
        script: std::vec::IntoIter<String>,
        responses: Arc<Mutex<Vec<String>>>,
    }

    impl Transport for ScriptedTransport {
        fn read_line(&mut self) -> IoResult<Option<String>> {
            Ok(self.script.next())
        }
        fn write_response(&mut self, response: &[u8]) -> IoResult<()> {
            self.responses
                .lock()
                .push(String::from_utf8(response.to_vec()).unwrap());
            Ok(())
        }
    }

    #[test]
    fn test_paused_gate_admits_no_commands() {
        let store = Arc::new(Store::new());
        let gate = Arc::new(PauseGate::new());
        let table = Arc::new(SessionTable::with_capacity(4));
        let responses = Arc::new(Mutex::new(Vec::new()));

        gate.pause();
        let id = table.reserve().unwrap();
        let session = Session::new(
            id,
            Arc::clone(&store),
            Arc::clone(&gate),
            Arc::clone(&table),
        );
        let sink = Arc::clone(&responses);
        let handle = thread::spawn(move || {
            session.run(move || {
                Ok(Box::new(ScriptedTransport {
                    script: vec!["a k v".to_owned(), "q k".to_owned()].into_iter(),
                    responses: sink,
                }) as Box<dyn Transport>)
            })
        });

        // while the gate is engaged, not a single command may start
        thread::sleep(Duration::from_millis(100));
        assert!(responses.lock().is_empty());
        assert!(store.get_cloned(b"k").is_none());

        gate.resume();
        handle.join().unwrap();
        assert_eq!(
            *responses.lock(),
            vec!["added".to_owned(), "v".to_owned(), "all done".to_owned()]
        );
        assert_eq!(store.get_cloned(b"k").unwrap().as_ref(), b"v");
        // the session marked itself reapable and recorded its service time
        assert_eq!(table.state_of(id), SlotState::Reapable);
        assert!(table.service_time_of(id).is_some());
    }

    #[test]
    fn test_pause_between_commands() {
        // engage the gate while a session is mid-script: whatever was in
        // flight completes, nothing new begins until resume
        let store = Arc::new(Store::new());
        let gate = Arc::new(PauseGate::new());
        let table = Arc::new(SessionTable::with_capacity(4));
        let responses = Arc::new(Mutex::new(Vec::new()));

        let id = table.reserve().unwrap();
        let session = Session::new(
            id,
            Arc::clone(&store),
            Arc::clone(&gate),
            Arc::clone(&table),
        );
        let sink = Arc::clone(&responses);
        let script: Vec<String> = (0..64).map(|i| format!("a key{} v", i)).collect();
        gate.pause();
        let handle = thread::spawn(move || {
            session.run(move || {
                Ok(Box::new(ScriptedTransport {
                    script: script.into_iter(),
                    responses: sink,
                }) as Box<dyn Transport>)
            })
        });
        thread::sleep(Duration::from_millis(50));
        let frozen = responses.lock().len();
        thread::sleep(Duration::from_millis(50));
        assert_eq!(responses.lock().len(), frozen);
        gate.resume();
        handle.join().unwrap();
        assert_eq!(responses.lock().len(), 65); // 64 adds + all done
    }
}

mod supervisor_tests {
    use crate::arbiter::Supervisor;
    use crate::config::ConfigurationSet;
    use std::fs;

    #[test]
    fn test_file_fed_session_roundtrip() {
        let dir = std::env::temp_dir().join(format!("oakd-test-e2e-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("commands.txt");
        let output = dir.join("responses.txt");
        fs::write(&input, "a alpha 1\na beta 2\nq alpha\nq gamma\nd beta\n").unwrap();

        let supervisor = Supervisor::new(&ConfigurationSet { max_sessions: 4 });
        supervisor.create_file_session(
            input.to_str().unwrap(),
            Some(output.to_str().unwrap()),
        );
        // `w` semantics: waits for the running session and reclaims the slot
        supervisor.join_all();

        let got = fs::read_to_string(&output).unwrap();
        assert_eq!(got, "added\nadded\n1\nnot found\nremoved\nall done\n");
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_slot_table_capacity_is_enforced() {
        let dir = std::env::temp_dir().join(format!("oakd-test-cap-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let input = dir.join("empty.txt");
        fs::write(&input, "").unwrap();

        let supervisor = Supervisor::new(&ConfigurationSet { max_sessions: 2 });
        let out_a = dir.join("a.txt");
        let out_b = dir.join("b.txt");
        supervisor.create_file_session(input.to_str().unwrap(), Some(out_a.to_str().unwrap()));
        supervisor.create_file_session(input.to_str().unwrap(), Some(out_b.to_str().unwrap()));
        // both slots taken; the third create is refused but harmless
        supervisor.create_file_session(input.to_str().unwrap(), None);
        supervisor.join_all();
        // after joining, the slots are free again
        supervisor.create_file_session(input.to_str().unwrap(), None);
        supervisor.join_all();
        let _ = fs::remove_dir_all(&dir);
    }
}
