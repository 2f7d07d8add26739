//! Interactive menu over a [`SocialNetwork`].
//!
//! The console reads one trimmed line per prompt from any `BufRead` and
//! writes to any `Write`, so scripted sessions can drive it in tests. End of
//! input ends the session just like option `0`.

use std::io::{self, BufRead, Write};

use crate::network::{NetworkError, SocialNetwork};
use crate::profile::User;

const RULE: &str = "------------------------------------------------------------";

/// What the loop does after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Console<'a, R, W> {
    network: &'a mut SocialNetwork,
    input: R,
    output: W,
}

impl<'a, R: BufRead, W: Write> Console<'a, R, W> {
    pub fn new(network: &'a mut SocialNetwork, input: R, output: W) -> Self {
        Self {
            network,
            input,
            output,
        }
    }

    /// Runs the menu until the user exits or input runs out.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            self.print_menu()?;
            let Some(choice) = self.read_line()? else {
                break;
            };
            let flow = self.dispatch(&choice)?;
            writeln!(self.output)?;
            if flow == Flow::Quit {
                break;
            }
        }
        self.output.flush()
    }

    fn dispatch(&mut self, choice: &str) -> io::Result<Flow> {
        match choice {
            "1" => self.add_user(),
            "2" => self.delete_user(),
            "3" => self.add_friend(),
            "4" => self.remove_friend(),
            "5" => self.display_friends(),
            "6" => self.mutual_friends(),
            "7" => self.suggest_friends(),
            "8" => self.connected_groups(),
            "9" => self.view_profile(),
            "10" => self.recently_viewed(),
            "11" => self.send_message(),
            "12" => self.deliver_next(),
            "13" => self.message_queue(),
            "14" => self.most_connected(),
            "15" => self.list_users(),
            "0" => {
                writeln!(self.output, "  Goodbye!")?;
                Ok(Flow::Quit)
            }
            _ => {
                writeln!(self.output, "  [ERROR] Invalid option.")?;
                Ok(Flow::Continue)
            }
        }
    }

    fn print_menu(&mut self) -> io::Result<()> {
        let out = &mut self.output;
        writeln!(out, "{RULE}")?;
        writeln!(out, "   1.  Add User                  2.  Delete User")?;
        writeln!(out, "   3.  Add Friend                4.  Remove Friend")?;
        writeln!(out, "   5.  Display Friends           6.  Mutual Friends")?;
        writeln!(out, "   7.  Suggest Friends           8.  Connected Groups")?;
        writeln!(out, "   9.  View Profile              10. Recently Viewed")?;
        writeln!(out, "   11. Send Message              12. Process Next Message")?;
        writeln!(out, "   13. Show Message Queue        14. Most Connected User")?;
        writeln!(out, "   15. List All Users             0. Exit")?;
        writeln!(out, "{RULE}")?;
        write!(out, "   Choice: ")?;
        out.flush()
    }

    fn add_user(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("User ID ")? else { return Ok(Flow::Quit) };
        let Some(name) = self.prompt("Name    ")? else { return Ok(Flow::Quit) };
        let Some(age) = self.prompt("Age     ")? else { return Ok(Flow::Quit) };
        let Some(email) = self.prompt("Email   ")? else { return Ok(Flow::Quit) };
        let Ok(age) = age.parse::<u32>() else {
            writeln!(self.output, "  [ERROR] Age must be a whole number.")?;
            return Ok(Flow::Continue);
        };
        match self.network.add_user(&id, &name, age, &email) {
            Ok(user) => writeln!(self.output, "  [OK] User added: {user}")?,
            Err(err) => report(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn delete_user(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("User ID")? else { return Ok(Flow::Quit) };
        match self.network.delete_user(&id) {
            Ok(_) => writeln!(self.output, "  [OK] User '{id}' deleted.")?,
            Err(err) => report(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn add_friend(&mut self) -> io::Result<Flow> {
        let Some((a, b)) = self.prompt_pair()? else { return Ok(Flow::Quit) };
        match self.network.add_friend(&a, &b) {
            Ok(()) => writeln!(self.output, "  [OK] Friendship added: {a} <---> {b}")?,
            Err(NetworkError::AlreadyFriends(..)) => writeln!(self.output, "  [INFO] Already friends.")?,
            Err(err) => report(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn remove_friend(&mut self) -> io::Result<Flow> {
        let Some((a, b)) = self.prompt_pair()? else { return Ok(Flow::Quit) };
        match self.network.remove_friend(&a, &b) {
            Ok(()) => writeln!(self.output, "  [OK] Friendship removed: {a} and {b}")?,
            Err(NetworkError::NotFriends(..)) => writeln!(self.output, "  [INFO] Not friends.")?,
            Err(err) => report(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn display_friends(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("User ID")? else { return Ok(Flow::Quit) };
        match self.network.friends(&id) {
            Ok(friends) => {
                writeln!(self.output, "  Friends of {id} [{} total]:", friends.len())?;
                list_users(&mut self.output, &friends, "(None)")?;
            }
            Err(err) => report(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn mutual_friends(&mut self) -> io::Result<Flow> {
        let Some((a, b)) = self.prompt_pair()? else { return Ok(Flow::Quit) };
        match self.network.mutual_friends(&a, &b) {
            Ok(mutual) => {
                writeln!(
                    self.output,
                    "  Mutual friends [{}] between {a} and {b}:",
                    mutual.len()
                )?;
                list_users(&mut self.output, &mutual, "(None)")?;
            }
            Err(err) => report(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn suggest_friends(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("User ID")? else { return Ok(Flow::Quit) };
        match self.network.suggest_friends(&id) {
            Ok(suggestions) => {
                writeln!(self.output, "  Suggestions for {id} [{}]:", suggestions.len())?;
                list_users(&mut self.output, &suggestions, "(No suggestions)")?;
            }
            Err(err) => report(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn connected_groups(&mut self) -> io::Result<Flow> {
        let groups = self.network.connected_groups();
        writeln!(self.output, "  Connected Groups [{} found]:", groups.len())?;
        for (i, group) in groups.iter().enumerate() {
            let names: Vec<&str> = group
                .iter()
                .map(|id| self.network.display_name(id))
                .collect();
            writeln!(self.output, "    Group {}: {}", i + 1, names.join("  "))?;
        }
        Ok(Flow::Continue)
    }

    fn view_profile(&mut self) -> io::Result<Flow> {
        let Some(id) = self.prompt("User ID")? else { return Ok(Flow::Quit) };
        match self.network.view_profile(&id) {
            Ok((user, friends)) => {
                writeln!(self.output, "  {user}")?;
                writeln!(self.output, "  Friends: {friends}")?;
            }
            Err(err) => report(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn recently_viewed(&mut self) -> io::Result<Flow> {
        let viewed: Vec<&str> = self.network.recently_viewed().collect();
        if viewed.is_empty() {
            writeln!(self.output, "  (None)")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "  Recently Viewed [most recent first]:")?;
        for (rank, id) in viewed.iter().enumerate() {
            writeln!(self.output, "    {}. {}", rank + 1, self.network.display_name(id))?;
        }
        Ok(Flow::Continue)
    }

    fn send_message(&mut self) -> io::Result<Flow> {
        let Some(from) = self.prompt("From ID ")? else { return Ok(Flow::Quit) };
        let Some(to) = self.prompt("To ID   ")? else { return Ok(Flow::Quit) };
        let Some(content) = self.prompt("Message ")? else { return Ok(Flow::Quit) };
        match self.network.send_message(&from, &to, &content) {
            Ok(()) => writeln!(self.output, "  [OK] Message queued.")?,
            Err(err) => report(&mut self.output, &err)?,
        }
        Ok(Flow::Continue)
    }

    fn deliver_next(&mut self) -> io::Result<Flow> {
        match self.network.deliver_next() {
            Some(message) => writeln!(self.output, "  [DELIVERED] {message}")?,
            None => writeln!(self.output, "  [INFO] Queue is empty.")?,
        }
        Ok(Flow::Continue)
    }

    fn message_queue(&mut self) -> io::Result<Flow> {
        let pending = self.network.pending_messages();
        if pending.is_empty() {
            writeln!(self.output, "  (Queue is empty)")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "  Pending Messages [{}]:", pending.len())?;
        for (i, message) in pending.iter().enumerate() {
            writeln!(self.output, "    {}. {message}", i + 1)?;
        }
        Ok(Flow::Continue)
    }

    fn most_connected(&mut self) -> io::Result<Flow> {
        let ranking = self.network.ranking();
        let Some((top, top_degree)) = ranking.first() else {
            writeln!(self.output, "  (No users)")?;
            return Ok(Flow::Continue);
        };
        writeln!(self.output, "  Users by connection count:")?;
        for (id, degree) in &ranking {
            writeln!(
                self.output,
                "    {}  ->  {degree} friend(s)",
                self.network.display_name(id)
            )?;
        }
        writeln!(
            self.output,
            "  >>> Most Connected: {} ({top_degree} friends)",
            self.network.display_name(top)
        )?;
        Ok(Flow::Continue)
    }

    fn list_users(&mut self) -> io::Result<Flow> {
        if self.network.user_count() == 0 {
            writeln!(self.output, "  (No users)")?;
            return Ok(Flow::Continue);
        }
        writeln!(self.output, "  All Users [{}]:", self.network.user_count())?;
        for user in self.network.users() {
            writeln!(self.output, "    {user}")?;
        }
        Ok(Flow::Continue)
    }

    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "  {label}: ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn prompt_pair(&mut self) -> io::Result<Option<(String, String)>> {
        let Some(a) = self.prompt("User A ID")? else { return Ok(None) };
        let Some(b) = self.prompt("User B ID")? else { return Ok(None) };
        Ok(Some((a, b)))
    }

    // `None` at end of input
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

fn report<W: Write>(out: &mut W, err: &NetworkError) -> io::Result<()> {
    writeln!(out, "  [ERROR] {err}")
}

fn list_users<W: Write>(out: &mut W, users: &[&User], empty: &str) -> io::Result<()> {
    if users.is_empty() {
        return writeln!(out, "    {empty}");
    }
    for user in users {
        writeln!(out, "    -> {user}")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seed;
    use std::io::Cursor;

    fn session(script: &str) -> (SocialNetwork, String) {
        let mut network = SocialNetwork::new();
        seed::load_sample(&mut network);
        let mut output = Vec::new();
        Console::new(&mut network, Cursor::new(script.to_string()), &mut output)
            .run()
            .unwrap();
        (network, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_exit() {
        let (_, output) = session("0\n");
        assert!(output.contains("Goodbye!"));
    }

    #[test]
    fn test_eof_ends_session() {
        let (network, output) = session("1\nu7\n");
        assert!(!output.contains("Goodbye!"));
        assert!(network.user("u7").is_none());
    }

    #[test]
    fn test_invalid_option() {
        let (_, output) = session("42\n0\n");
        assert!(output.contains("[ERROR] Invalid option."));
    }

    #[test]
    fn test_add_user_and_friend() {
        let (network, output) = session("1\nu7\nGrace\n30\ngrace@mail.com\n3\nu7\nu6\n3\nu6\nu7\n0\n");
        assert!(output.contains("[OK] User added: [ID: u7 | Name: Grace | Age: 30 | Email: grace@mail.com]"));
        assert!(output.contains("[OK] Friendship added: u7 <---> u6"));
        assert!(output.contains("[INFO] Already friends."));
        assert!(network.graph().has_edge("u6", "u7"));
    }

    #[test]
    fn test_add_user_bad_age() {
        let (network, output) = session("1\nu7\nGrace\nthirty\ngrace@mail.com\n0\n");
        assert!(output.contains("[ERROR] Age must be a whole number."));
        assert!(network.user("u7").is_none());
    }

    #[test]
    fn test_duplicate_user() {
        let (_, output) = session("1\nu1\nAgain\n20\na@mail.com\n0\n");
        assert!(output.contains("[ERROR] user ID 'u1' already exists"));
    }

    #[test]
    fn test_graph_queries() {
        let (_, output) = session("6\nu1\nu4\n7\nu1\n8\n14\n0\n");
        assert!(output.contains("Mutual friends [2] between u1 and u4:"));
        assert!(output.contains("-> [ID: u2 | Name: Bob"));
        assert!(output.contains("Suggestions for u1 [1]:"));
        assert!(output.contains("-> [ID: u4 | Name: Diana"));
        assert!(output.contains("Group 1: Alice  Bob  Diana  Charlie  Eve"));
        assert!(output.contains("Group 2: Frank"));
        assert!(output.contains(">>> Most Connected: Diana (3 friends)"));
    }

    #[test]
    fn test_unknown_user() {
        let (_, output) = session("5\nu9\n0\n");
        assert!(output.contains("[ERROR] user 'u9' not found"));
    }

    #[test]
    fn test_remove_friend_and_delete_user() {
        let (network, output) = session("4\nu1\nu6\n4\nu1\nu2\n2\nu4\n5\nu5\n0\n");
        assert!(output.contains("[INFO] Not friends."));
        assert!(output.contains("[OK] Friendship removed: u1 and u2"));
        assert!(output.contains("[OK] User 'u4' deleted."));
        assert!(output.contains("Friends of u5 [0 total]:"));
        assert_eq!(network.graph().edge_count(), 1);
    }

    #[test]
    fn test_recently_viewed() {
        let (_, output) = session("10\n9\nu2\n9\nu3\n10\n0\n");
        assert!(output.contains("  (None)"));
        assert!(output.contains("Friends: 2"));
        assert!(output.contains("1. Charlie"));
        assert!(output.contains("2. Bob"));
    }

    #[test]
    fn test_messages() {
        let (network, output) = session("11\nu5\nu4\nhi Diana\n13\n12\n12\n12\n12\n0\n");
        assert!(output.contains("[OK] Message queued."));
        assert!(output.contains("Pending Messages [3]:"));
        assert!(output.contains("[DELIVERED] From: u1  ->  To: u2  |  \"Hey Bob!\""));
        assert!(output.contains("[DELIVERED] From: u5  ->  To: u4  |  \"hi Diana\""));
        assert!(output.contains("[INFO] Queue is empty."));
        assert!(network.pending_messages().is_empty());
    }

    #[test]
    fn test_empty_network() {
        let mut network = SocialNetwork::new();
        let mut output = Vec::new();
        Console::new(&mut network, Cursor::new("14\n15\n8\n0\n"), &mut output)
            .run()
            .unwrap();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("(No users)"));
        assert!(output.contains("Connected Groups [0 found]:"));
    }
}
