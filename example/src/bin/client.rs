//! Demo client - reads the game credentials from the environment

use gamejolt::{
	Config, Requester, User,
	components::{SessionStatus, TrophyQuery},
	http::HttpTransport,
};

#[tokio::main]
async fn main() {
	let config = match Config::from_env() {
		Ok(config) => config,
		Err(e) => {
			eprintln!("❌ {e}");
			return;
		},
	};

	let requester = match Requester::new(config, HttpTransport::new()) {
		Ok(requester) => requester,
		Err(e) => {
			eprintln!("❌ Invalid configuration: {e}");
			return;
		},
	};

	println!("📍 Fetching server time...");
	match requester.time().fetch().await {
		Ok(time) => println!("🕐 {} ({})", time.timestamp, time.timezone),
		Err(e) => eprintln!("❌ Time fetch failed: {e}"),
	}

	// A user is only needed for the session and trophy calls below
	let (Ok(username), Ok(token)) = (
		std::env::var("GAMEJOLT_USERNAME"),
		std::env::var("GAMEJOLT_USER_TOKEN"),
	) else {
		println!("\n✨ Done! Set GAMEJOLT_USERNAME and GAMEJOLT_USER_TOKEN for more.");
		return;
	};
	let user = User::authenticated(username, token);

	println!("\n🔐 Authenticating {}...", user.username);
	if let Err(e) = requester.users().authenticate(&user.username, user.token().unwrap_or_default()).await {
		eprintln!("❌ Authentication failed: {e}");
		return;
	}

	match requester.sessions().open(&user).await {
		Ok(opened) => println!("✅ Session opened: {opened}"),
		Err(e) => eprintln!("❌ Session open failed: {e}"),
	}

	match requester.trophies().fetch(&user, &TrophyQuery::All, None).await {
		Ok(trophies) => {
			for trophy in trophies {
				let mark = if trophy.is_achieved() { "🏆" } else { "🔒" };
				println!("{mark} {} ({})", trophy.title, trophy.difficulty);
			}
		},
		Err(e) => eprintln!("❌ Trophy fetch failed: {e}"),
	}

	if let Err(e) = requester.sessions().ping_with_status(&user, SessionStatus::Idle).await {
		eprintln!("❌ Session ping failed: {e}");
	}
	if let Err(e) = requester.sessions().close(&user).await {
		eprintln!("❌ Session close failed: {e}");
	}

	println!("\n✨ Done!");
}
